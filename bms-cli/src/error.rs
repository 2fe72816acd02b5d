//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use bms::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// The resolved configuration could not be rendered.
    Output(String),

    /// An error already written to the log; only its exit code remains.
    Logged(Box<CliError>),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Configuration validation failed
    /// - 2: Configuration could not be resolved (path or decode error)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::Validation { .. } => 1,
                LibError::Path(_)
                | LibError::Decode { .. }
                | LibError::ConfigDirUnavailable
                | LibError::HomeDirUnavailable { .. } => 2,
                LibError::Io(_) => 5,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Output(_) => 6,
            CliError::Logged(inner) => inner.exit_code(),
        }
    }

    /// Returns true when the error has already been logged.
    pub fn is_logged(&self) -> bool {
        matches!(self, CliError::Logged(_))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Output(msg) => write!(f, "Failed to render configuration: {msg}"),
            CliError::Logged(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Logged(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
