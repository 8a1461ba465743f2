//! Error module. See the [failure](https://crates.io/crates/failure) crate for details.

use std::fmt;
use std::result;

use failure::{Backtrace, Context, Fail};

/// Convenient alias for this crate's error type.
pub type Result<T> = result::Result<T, Error>;

/// The error type for shell operations.
#[derive(Debug)]
pub struct Error {
    ctx: Context<ErrorKind>,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.ctx.get_context()
    }

    pub(crate) fn builtin_command<T: AsRef<str>>(message: T, code: i32) -> Error {
        Error::from(ErrorKind::BuiltinCommand {
            message: message.as_ref().to_string(),
            code,
        })
    }

    pub(crate) fn no_background_job() -> Error {
        Error::from(ErrorKind::NoBackgroundJob)
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.ctx.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.ctx.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ctx.fmt(f)
    }
}

/// The kinds of errors shell operations can produce.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A builtin rejected its invocation, e.g. wrong argument count.
    BuiltinCommand {
        /// Message displayed to the user.
        message: String,
        /// Exit status the builtin finished with.
        code: i32,
    },
    /// killbg was invoked with an empty background slot.
    NoBackgroundJob,
    /// The process-creation primitive itself failed.
    Fork,
    /// An I/O operation failed.
    Io,
    /// A system call failed.
    Nix,
    /// Reading a line of input failed.
    Readline,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::BuiltinCommand { ref message, .. } => write!(f, "{}", message),
            ErrorKind::NoBackgroundJob => write!(f, "no background job"),
            ErrorKind::Fork => write!(f, "fork failed"),
            ErrorKind::Io => write!(f, "I/O error occurred"),
            ErrorKind::Nix => write!(f, "Nix error occurred"),
            ErrorKind::Readline => write!(f, "Readline error occurred"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(Context::new(kind))
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(ctx: Context<ErrorKind>) -> Error {
        Error { ctx }
    }
}
