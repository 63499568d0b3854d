//! Errors surfaced by the `campsite` binary.
//!
//! Library errors are wrapped and mapped onto exit codes by kind.

use campsite::{Error as LibError, ErrorKind};
use std::fmt;

/// Everything a command can fail with, each mapped to a process exit code.
#[derive(Debug)]
pub enum CliError {
    /// Error raised by the reservation library.
    Library(LibError),

    /// Arguments that parse but make no sense together.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// No database exists and initialization is disabled.
    NoDataDirectory,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Process exit code for this error:
    ///
    /// - 1: Conflict, wrong confirmation code, or forbidden state change
    /// - 3: No data directory found
    /// - 4: Invalid arguments or input validation failure
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    /// - 8: Site or reservation not found
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err.kind() {
                ErrorKind::Conflict | ErrorKind::Authorization | ErrorKind::InvalidState => 1,
                ErrorKind::Validation => 4,
                ErrorKind::NotFound => 8,
                ErrorKind::Storage => match lib_err {
                    LibError::Io(_) => 5,
                    LibError::Configuration(_) => 7,
                    _ => 6,
                },
            },
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (run `campsite init` or drop --disable-autoinit)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::DataDirectoryNotFound { .. } => CliError::NoDataDirectory,
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
