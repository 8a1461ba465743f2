use std::fs::File;
use std::io::{self, BufRead, BufReader};

use failure::Fail;

use super::prelude::*;

pub struct Runsh;

impl BuiltinCommand for Runsh {
    const NAME: &'static str = super::RUNSH_NAME;

    const HELP: &'static str = "\
runsh: runsh script.sh
    Execute each line of SCRIPT.SH as if it had been typed at the prompt,
    in file order. Blank lines are skipped.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if args.len() != 1 {
            return Err(Error::builtin_command(
                format!("runsh: takes exactly one argument ({} given)", args.len()),
                2,
            ));
        }

        let path = args[0].as_ref();
        if !path.ends_with(".sh") {
            return Err(Error::builtin_command(
                format!("runsh: {}: not a shell script", path),
                1,
            ));
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::builtin_command(
                    format!("runsh: {}: file not found", path),
                    1,
                ));
            }
            Err(e) => return Err(e.context(ErrorKind::Io).into()),
        };

        for line in BufReader::new(file).lines() {
            let line = line.context(ErrorKind::Io)?;
            // A failing line is reported the same way the prompt reports
            // it; the rest of the script still runs.
            if let Err(e) = shell.execute_command_string(&line) {
                eprintln!("tsh: {}", e);
            }
        }

        Ok(())
    }
}
