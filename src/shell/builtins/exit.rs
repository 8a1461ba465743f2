use super::prelude::*;

pub struct Exit;

impl BuiltinCommand for Exit {
    const NAME: &'static str = super::EXIT_NAME;

    const HELP: &'static str = "\
exit: exit
    Exit the shell with a status of 0.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if !args.is_empty() {
            return Err(Error::builtin_command(
                format!("exit: takes no arguments ({} given)", args.len()),
                2,
            ));
        }
        shell.exit();
    }
}
