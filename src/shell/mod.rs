//! Tsh - Shell Module
//!
//! The shell proper: session context, builtin dispatch, the process
//! launcher, and job control.

pub(crate) mod builtins;
pub(crate) mod execute_command;
pub mod job_control;
#[allow(clippy::module_inception)]
mod shell;

pub use self::job_control::{InterruptToken, Job, JobMode, JobState};
pub use self::shell::{Shell, ShellConfig};
