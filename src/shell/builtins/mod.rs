//! Tsh builtins
//!
//! This module includes the implementations of the interpreter's builtin
//! commands. Each builtin validates its own argument-count contract and
//! reports violations as usage errors; none of them aborts the read loop.

use std::io::Write;

use crate::errors::Result;
use crate::shell::Shell;

use self::cd::Cd;
use self::exit::Exit;
use self::help::Help;
use self::jobs::{Runbg, Runfg};
use self::kill::Killbg;
use self::script::Runsh;

pub mod prelude {
    pub use std::io::Write;

    pub use failure::ResultExt;

    pub use super::BuiltinCommand;
    pub use crate::errors::{Error, ErrorKind, Result};
    pub use crate::shell::Shell;
}

mod cd;
mod exit;
mod help;
mod jobs;
mod kill;
mod script;

const CD_NAME: &str = "cd";
const EXIT_NAME: &str = "exit";
const HELP_NAME: &str = "help";
const KILLBG_NAME: &str = "killbg";
const RUNBG_NAME: &str = "runbg";
const RUNFG_NAME: &str = "runfg";
const RUNSH_NAME: &str = "runsh";

/// Represents a Tsh builtin command such as cd or killbg.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> String {
        Self::HELP.lines().nth(0).unwrap().to_owned()
    }
    /// Runs the command with the given arguments in the `shell` environment.
    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    [
        CD_NAME,
        EXIT_NAME,
        HELP_NAME,
        KILLBG_NAME,
        RUNBG_NAME,
        RUNFG_NAME,
        RUNSH_NAME,
    ]
    .contains(&program.as_ref())
}

/// precondition: command is a builtin.
pub fn run<S1, S2>(
    shell: &mut Shell,
    program: S1,
    args: &[S2],
    stdout: &mut dyn Write,
) -> Result<()>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug_assert!(is_builtin(&program));

    match program.as_ref() {
        CD_NAME => Cd::run(shell, args, stdout),
        EXIT_NAME => Exit::run(shell, args, stdout),
        HELP_NAME => Help::run(shell, args, stdout),
        KILLBG_NAME => Killbg::run(shell, args, stdout),
        RUNBG_NAME => Runbg::run(shell, args, stdout),
        RUNFG_NAME => Runfg::run(shell, args, stdout),
        RUNSH_NAME => Runsh::run(shell, args, stdout),
        _ => unreachable!(),
    }
}
