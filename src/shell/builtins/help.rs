use super::cd::Cd;
use super::exit::Exit;
use super::jobs::{Runbg, Runfg};
use super::kill::Killbg;
use super::prelude::*;
use super::script::Runsh;

pub struct Help;

impl BuiltinCommand for Help {
    const NAME: &'static str = super::HELP_NAME;

    const HELP: &'static str = "\
help: help [command]
    Display information about builtin commands. With COMMAND, show the
    full help for that builtin; otherwise list every builtin.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()> {
        if args.len() > 1 {
            return Err(Error::builtin_command(
                format!("help: takes at most one argument ({} given)", args.len()),
                2,
            ));
        }

        match args.first() {
            None => print_all_usage_strings(stdout),
            Some(name) => {
                let help = match name.as_ref() {
                    super::CD_NAME => Cd::HELP,
                    super::EXIT_NAME => Exit::HELP,
                    super::HELP_NAME => Help::HELP,
                    super::KILLBG_NAME => Killbg::HELP,
                    super::RUNBG_NAME => Runbg::HELP,
                    super::RUNFG_NAME => Runfg::HELP,
                    super::RUNSH_NAME => Runsh::HELP,
                    unknown => {
                        return Err(Error::builtin_command(
                            format!("help: no help topics match '{}'", unknown),
                            1,
                        ));
                    }
                };
                writeln!(stdout, "{}", help).context(ErrorKind::Io)?;
                Ok(())
            }
        }
    }
}

fn print_all_usage_strings(stdout: &mut dyn Write) -> Result<()> {
    writeln!(stdout, "These commands are builtin:").context(ErrorKind::Io)?;
    for usage in &[
        Cd::usage(),
        Exit::usage(),
        Help::usage(),
        Killbg::usage(),
        Runbg::usage(),
        Runfg::usage(),
        Runsh::usage(),
    ] {
        writeln!(stdout, "{}", usage).context(ErrorKind::Io)?;
    }
    Ok(())
}
