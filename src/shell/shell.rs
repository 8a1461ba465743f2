//! The Shell is the session context: it owns the editor, the home
//! directory, the single background slot, and the interrupt token, so
//! independent instances can coexist in tests.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use failure::ResultExt;
use log::{debug, error, info, warn};
use nix::sys::signal::{self, Signal};

use crate::editor::Editor;
use crate::errors::{Error, ErrorKind, Result};
use crate::parse::CommandLine;
use crate::shell::builtins;
use crate::shell::execute_command::{spawn_process, PathLookup};
use crate::shell::job_control::{
    install_interrupt_handler, wait_for_job, InterruptToken, Job, JobMode,
};

const HISTORY_FILE_NAME: &str = ".tsh_history";

/// Tsh Shell
pub struct Shell {
    editor: Editor,
    history_file: Option<PathBuf>,
    home_dir: Option<PathBuf>,
    /// At most one background job is tracked at a time.
    background_job: Option<Job>,
    interrupt: InterruptToken,
    config: ShellConfig,
}

impl Shell {
    /// Constructs a new Shell to run jobs and track the background slot.
    pub fn new(config: ShellConfig) -> Result<Shell> {
        let interrupt = if config.install_interrupt_handler {
            install_interrupt_handler()?
        } else {
            InterruptToken::detached()
        };

        let mut shell = Shell {
            editor: Editor::with_capacity(config.command_history_capacity)?,
            history_file: None,
            home_dir: dirs::home_dir(),
            background_job: None,
            interrupt,
            config,
        };

        if config.enable_command_history {
            shell.load_history();
        }

        info!("tsh started up");
        Ok(shell)
    }

    fn load_history(&mut self) {
        self.history_file = self.home_dir.as_ref().map(|p| p.join(HISTORY_FILE_NAME));
        if let Some(ref history_file) = self.history_file {
            let temp_result = self.editor.load_history(history_file);
            log_if_err!(temp_result, "load_history");
        } else {
            warn!("unable to get home directory");
        }
    }

    /// Custom prompt: the working directory with the home prefix
    /// abbreviated to `~`. Returns `None` when the read loop should end.
    pub fn prompt(&mut self) -> Result<Option<String>> {
        let cwd = env::current_dir().context(ErrorKind::Io)?;
        let rel = match self.home_dir {
            Some(ref home) => match cwd.strip_prefix(home) {
                Ok(rel) => Path::new("~").join(rel),
                Err(_) => cwd.clone(),
            },
            None => cwd.clone(),
        };

        self.editor.readline(&format!("{}$ ", rel.display()))
    }

    /// Runs a single command line: a builtin, or an external executable.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let command = match CommandLine::parse(input) {
            Some(command) => command,
            // Empty and whitespace-only lines are a no-op.
            None => return Ok(()),
        };

        if self.config.enable_command_history {
            self.editor.add_history_entry(input.trim());
        }

        if builtins::is_builtin(&command.program) {
            builtins::run(self, &command.program, &command.args, &mut io::stdout())
        } else {
            self.run_external(&command)
        }
    }

    /// Runs jobs from stdin until end of input or an interrupt at the
    /// prompt.
    pub fn execute_from_stdin(&mut self) {
        loop {
            // An interrupt raised while no foreground wait was active is a
            // no-op; drop it so it cannot cancel the next job.
            self.interrupt.take();

            let input = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            if let Err(e) = self.execute_command_string(&input) {
                eprintln!("tsh: {}", e);
                debug!("command failed: {}", e);
            }
        }
    }

    /// Runs a PATH-resolved executable as a foreground job.
    fn run_external(&mut self, command: &CommandLine) -> Result<()> {
        let job = spawn_process(&command.argv(), PathLookup::SearchPath, JobMode::Foreground)?;
        let state = wait_for_job(&job, self.interrupt)?;
        debug!("external job {} -> {:?}", job, state);
        Ok(())
    }

    /// Runs `./args[0]` as a foreground job, blocking until that specific
    /// child exits or an interrupt is forwarded to it.
    pub fn run_foreground(&mut self, args: &[String]) -> Result<()> {
        let job = spawn_process(args, PathLookup::WorkingDir, JobMode::Foreground)?;
        let state = wait_for_job(&job, self.interrupt)?;
        debug!("foreground job {} -> {:?}", job, state);
        Ok(())
    }

    /// Runs `./args[0]` as the background job and records it in the slot.
    ///
    /// A still-running previously tracked job is only un-tracked, never
    /// signaled.
    pub fn run_background(&mut self, args: &[String]) -> Result<()> {
        let job = spawn_process(args, PathLookup::WorkingDir, JobMode::Background)?;
        if let Some(previous) = self.background_job.replace(job) {
            debug!("dropping tracking of background job {}", previous);
        }
        Ok(())
    }

    /// Sends SIGINT to the tracked background job.
    pub fn kill_background_job(&mut self) -> Result<()> {
        // The empty slot is checked up front; it must never reach the kill
        // call as a bogus pid.
        match self.background_job {
            None => Err(Error::no_background_job()),
            Some(job) => {
                signal::kill(job.pid(), Signal::SIGINT).context(ErrorKind::Nix)?;
                debug!("sent SIGINT to background job {}", job);
                Ok(())
            }
        }
    }

    /// The tracked background job, if any.
    pub fn background_job(&self) -> Option<&Job> {
        self.background_job.as_ref()
    }

    /// The home directory used by `cd` with no arguments.
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    pub(crate) fn interrupt_token(&self) -> InterruptToken {
        self.interrupt
    }

    /// Exits the shell with a success status.
    pub fn exit(&mut self) -> ! {
        if self.config.display_messages {
            println!("exit");
        }

        if self.config.enable_command_history {
            if let Some(ref history_file) = self.history_file {
                if let Err(e) = self.editor.save_history(history_file) {
                    error!("failed to save history during shutdown: {}", e);
                }
            }
        }

        info!("tsh has shut down");
        process::exit(0);
    }
}

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Determines if new command entries will be added to the shell's
    /// command history and persisted across sessions.
    enable_command_history: bool,

    /// Number of entries to store in the shell's command history.
    command_history_capacity: usize,

    /// Determines if the process's SIGINT is routed to the foreground wait
    /// loop.
    install_interrupt_handler: bool,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates an interactive shell: command history, interrupt routing,
    /// and user-facing messages are all enabled.
    pub fn interactive(command_history_capacity: usize) -> ShellConfig {
        ShellConfig {
            enable_command_history: true,
            command_history_capacity,
            install_interrupt_handler: true,
            display_messages: true,
        }
    }

    /// Creates a noninteractive shell: no history, no process-wide signal
    /// handler, fewer messages. Suitable for embedding in tests.
    pub fn noninteractive() -> ShellConfig {
        Default::default()
    }
}

impl Default for ShellConfig {
    fn default() -> ShellConfig {
        ShellConfig {
            enable_command_history: false,
            command_history_capacity: 0,
            install_interrupt_handler: false,
            display_messages: false,
        }
    }
}
