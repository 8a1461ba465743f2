use super::prelude::*;

pub struct Runfg;

impl BuiltinCommand for Runfg {
    const NAME: &'static str = super::RUNFG_NAME;

    const HELP: &'static str = "\
runfg: runfg program [argument ...]
    Run PROGRAM from the current directory as a foreground job, blocking
    until it exits. An interrupt ends the wait and is forwarded to the
    job.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            return Err(Error::builtin_command(Self::usage(), 2));
        }
        shell.run_foreground(&to_owned_args(args))
    }
}

pub struct Runbg;

impl BuiltinCommand for Runbg {
    const NAME: &'static str = super::RUNBG_NAME;

    const HELP: &'static str = "\
runbg: runbg program [argument ...]
    Run PROGRAM from the current directory as a background job. At most
    one background job is tracked at a time; launching another replaces
    the tracked one.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            return Err(Error::builtin_command(Self::usage(), 2));
        }
        shell.run_background(&to_owned_args(args))
    }
}

fn to_owned_args<T: AsRef<str>>(args: &[T]) -> Vec<String> {
    args.iter().map(|arg| arg.as_ref().to_string()).collect()
}
