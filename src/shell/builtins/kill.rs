use super::prelude::*;

pub struct Killbg;

impl BuiltinCommand for Killbg {
    const NAME: &'static str = super::KILLBG_NAME;

    const HELP: &'static str = "\
killbg: killbg
    Send SIGINT to the tracked background job.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if !args.is_empty() {
            return Err(Error::builtin_command(
                format!("killbg: takes no arguments ({} given)", args.len()),
                2,
            ));
        }
        shell.kill_background_job()
    }
}
