//! Job control: the interruptible foreground wait loop and the interrupt
//! token that routes SIGINT to it.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use failure::{Fail, ResultExt};
use log::debug;
use nix::errno::Errno;
use nix::libc::c_int;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::Pid;

use crate::errors::{ErrorKind, Result};

static SIGINT_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigint(_signal: c_int) {
    // Signal handler: only async-signal-safe operations allowed.
    SIGINT_PENDING.store(true, Ordering::SeqCst);
}

/// Handle for delivering and observing interrupt requests.
///
/// Interrupts are acted on at one suspension point only: the foreground
/// wait loop. Everywhere else a pending interrupt is a no-op that gets
/// discarded, which is how background jobs stay untouched by Ctrl-C.
#[derive(Clone, Copy, Debug)]
pub struct InterruptToken {
    pending: &'static AtomicBool,
}

impl InterruptToken {
    /// A token that no signal handler writes to; it is raised only through
    /// [`InterruptToken::raise`]. The backing flag must outlive every wait
    /// that checks it, so it is leaked.
    pub fn detached() -> InterruptToken {
        InterruptToken {
            pending: Box::leak(Box::new(AtomicBool::new(false))),
        }
    }

    /// Marks an interrupt as pending.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Consumes the pending interrupt, if any.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}

/// Installs the process-wide SIGINT handler and returns the token it
/// raises.
///
/// `SaFlags::empty()` leaves SA_RESTART off so that a blocking wait
/// returns EINTR and the wait loop gets to look at the token.
pub fn install_interrupt_handler() -> Result<InterruptToken> {
    let action = SigAction::new(
        SigHandler::Handler(handle_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe { signal::sigaction(Signal::SIGINT, &action) }.context(ErrorKind::Nix)?;
    Ok(InterruptToken {
        pending: &SIGINT_PENDING,
    })
}

/// One spawned external process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Job {
    pid: Pid,
    mode: JobMode,
}

impl Job {
    pub(crate) fn new(pid: Pid, mode: JobMode) -> Job {
        Job { pid, mode }
    }

    /// The child's process identifier.
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Whether the job was launched in the foreground or background.
    pub fn mode(&self) -> JobMode {
        self.mode
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}) {}", self.pid, self.mode)
    }
}

/// Whether a job's completion blocks the interpreter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobMode {
    /// The interpreter waits for the job before reading more input.
    Foreground,
    /// The job runs concurrently with the interpreter.
    Background,
}

impl fmt::Display for JobMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JobMode::Foreground => write!(f, "foreground"),
            JobMode::Background => write!(f, "background"),
        }
    }
}

/// The wait loop's view of a job after it returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JobState {
    /// Still running: the wait was abandoned after forwarding an interrupt.
    Running,
    /// Exited on its own with the given status code.
    Exited(i32),
    /// Terminated by the given signal.
    Killed(Signal),
}

/// Blocks until the given job terminates or an interrupt arrives.
///
/// The loop waits on *any* child and filters by the job's pid: completion
/// notifications for unrelated children (the tracked background job, for
/// instance) are collected and discarded here rather than letting the loop
/// return early. On interrupt, SIGINT is forwarded to the job and the wait
/// is abandoned with the job still `Running`; nobody re-waits for it.
pub fn wait_for_job(job: &Job, interrupt: InterruptToken) -> Result<JobState> {
    loop {
        // The suspension point where cancellation is delivered.
        if interrupt.take() {
            signal::kill(job.pid(), Signal::SIGINT).context(ErrorKind::Nix)?;
            debug!("forwarded SIGINT to {}, abandoning wait", job);
            return Ok(JobState::Running);
        }

        match wait::waitpid(None::<Pid>, None) {
            Ok(status) if status.pid() == Some(job.pid()) => match status {
                WaitStatus::Exited(_, code) => {
                    debug!("{} exited with {}", job, code);
                    return Ok(JobState::Exited(code));
                }
                WaitStatus::Signaled(_, sig, _) => {
                    debug!("{} terminated by {:?}", job, sig);
                    return Ok(JobState::Killed(sig));
                }
                _ => {}
            },
            Ok(status) => {
                debug!("discarding notification for unrelated child: {:?}", status);
            }
            Err(Errno::EINTR) => {}
            Err(e) => return Err(e.context(ErrorKind::Nix).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::execute_command::{spawn_process, PathLookup};
    use crate::shell::test_support::REAP_LOCK;

    fn spawn(args: &[&str], mode: JobMode) -> Job {
        let args: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();
        spawn_process(&args, PathLookup::SearchPath, mode).expect("spawn failed")
    }

    #[test]
    fn token_take_consumes_the_pending_interrupt() {
        let token = InterruptToken::detached();
        assert!(!token.take());
        token.raise();
        assert!(token.take());
        assert!(!token.take());
    }

    #[test]
    fn wait_collects_the_spawned_childs_exit_status() {
        let _guard = REAP_LOCK.lock().unwrap();
        let job = spawn(&["true"], JobMode::Foreground);
        let state = wait_for_job(&job, InterruptToken::detached()).unwrap();
        assert_eq!(state, JobState::Exited(0));

        let job = spawn(&["false"], JobMode::Foreground);
        let state = wait_for_job(&job, InterruptToken::detached()).unwrap();
        assert_eq!(state, JobState::Exited(1));
    }

    #[test]
    fn wait_discards_notifications_for_unrelated_children() {
        let _guard = REAP_LOCK.lock().unwrap();
        let background = spawn(&["true"], JobMode::Background);
        let foreground = spawn(&["sleep", "0.3"], JobMode::Foreground);

        let state = wait_for_job(&foreground, InterruptToken::detached()).unwrap();
        assert_eq!(state, JobState::Exited(0));

        // The wait loop must have reaped the background child along the way.
        assert_eq!(
            wait::waitpid(background.pid(), None),
            Err(Errno::ECHILD)
        );
    }

    #[test]
    fn wait_forwards_a_pending_interrupt_and_abandons_the_wait() {
        let _guard = REAP_LOCK.lock().unwrap();
        let job = spawn(&["sleep", "30"], JobMode::Foreground);

        let token = InterruptToken::detached();
        token.raise();
        let state = wait_for_job(&job, token).unwrap();
        assert_eq!(state, JobState::Running);

        // The forwarded SIGINT terminates the child; reap it here since the
        // wait loop deliberately did not.
        let status = wait::waitpid(job.pid(), None).unwrap();
        assert_eq!(
            status,
            WaitStatus::Signaled(job.pid(), Signal::SIGINT, false)
        );
    }
}
