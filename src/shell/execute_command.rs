//! Process Launcher.
//!
//! A single spawn-and-resolve operation; the two completion policies
//! (block-and-filter vs. store-and-return) live with the callers in
//! [`crate::shell::Shell`].

use std::ffi::CString;
use std::process;

use failure::ResultExt;
use log::debug;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::unistd::{self, ForkResult};

use crate::errors::{ErrorKind, Result};
use crate::shell::job_control::{Job, JobMode};

const FAILED_TO_START_EXIT_STATUS: i32 = 1;

/// How the launcher resolves the program token to an executable image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathLookup {
    /// Prefix the program with `./`: only executables in the working
    /// directory are eligible. Absolute paths and PATH search are not
    /// supported in this mode.
    WorkingDir,
    /// Search `$PATH` the way execvp does.
    SearchPath,
}

/// Forks and execs `args` as a new job, `args[0]` being the program.
///
/// The returned [`Job`] is running; whether anyone waits on it is the
/// caller's policy. An executable that fails to resolve is reported by the
/// child branch itself ("file not found" / "command not found"), which
/// exits 1 without ever returning here; the parent cannot tell that apart
/// from a normally-failing program. A failing fork surfaces as
/// [`ErrorKind::Fork`] with nothing spawned.
pub fn spawn_process(args: &[String], lookup: PathLookup, mode: JobMode) -> Result<Job> {
    let argv = resolve_argv(args, lookup);
    let argv_c = to_cstrings(&argv)?;

    match unsafe { unistd::fork() }.context(ErrorKind::Fork)? {
        ForkResult::Parent { child } => {
            let job = Job::new(child, mode);
            debug!("spawned {}: {:?}", job, argv);
            Ok(job)
        }
        ForkResult::Child => {
            // The parent's custom signal handling must not leak into the
            // child: restore the default disposition before exec so both
            // the program and the failure branch below die normally on
            // interrupt.
            unsafe {
                let _ = signal::signal(Signal::SIGINT, SigHandler::SigDfl);
            }

            let result = match lookup {
                PathLookup::WorkingDir => unistd::execv(&argv_c[0], &argv_c),
                PathLookup::SearchPath => unistd::execvp(&argv_c[0], &argv_c),
            };

            // Reached only when exec could not resolve the executable.
            log_if_err!(result, "exec {:?}", argv);
            match lookup {
                PathLookup::WorkingDir => eprintln!("{}: file not found", argv[0]),
                PathLookup::SearchPath => {
                    eprintln!("tsh: {}: command not found", argv[0])
                }
            }
            process::exit(FAILED_TO_START_EXIT_STATUS);
        }
    }
}

fn resolve_argv(args: &[String], lookup: PathLookup) -> Vec<String> {
    let mut argv = args.to_vec();
    if lookup == PathLookup::WorkingDir {
        argv[0] = format!("./{}", argv[0]);
    }
    argv
}

fn to_cstrings(argv: &[String]) -> Result<Vec<CString>> {
    argv.iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<::std::result::Result<Vec<_>, _>>()
        .context(ErrorKind::Io)
        .map_err(Into::into)
}
