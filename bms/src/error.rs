//! Error types for the bms library.
//!
//! Resolution errors (path, decode, I/O) abort the pipeline immediately.
//! Validation errors are aggregated and carry the resolved configuration so
//! callers can still log it before failing.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::decode::DecodeError;
use crate::config::resolver::Diagnostics;
use crate::config::validator::ValidationErrors;

/// Result type alias for operations that may fail with a bms error.
///
/// # Examples
///
/// ```
/// use bms::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bms library.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration path does not point at a readable file.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The configuration document could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// The document that failed to decode.
        path: PathBuf,
        /// The underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// The resolved configuration violates one or more constraints.
    ///
    /// The resolved configuration is kept so callers can log it.
    #[error("config validation failed: {errors}")]
    Validation {
        /// Every violated constraint, in evaluation order.
        errors: ValidationErrors,
        /// The resolved configuration, its path and its warnings.
        diagnostics: Box<Diagnostics>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform did not report a user configuration directory.
    #[error("cannot determine the user configuration directory")]
    ConfigDirUnavailable,

    /// The home directory could not be determined for `~` expansion.
    #[error("cannot determine home directory to expand {}", path.display())]
    HomeDirUnavailable {
        /// The path that required expansion.
        path: PathBuf,
    },

    /// A logging setting holds a value the logger does not support.
    #[error("invalid log {field}: {value:?}")]
    InvalidLogSetting {
        /// The setting name (`format` or `level`).
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised before a configuration document is read.
#[derive(Debug, Error)]
pub enum PathError {
    /// Nothing exists at the configuration path.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The configuration path names a directory.
    #[error("config path is a directory: {}", path.display())]
    IsDirectory {
        /// The directory path.
        path: PathBuf,
    },
}

impl Error {
    /// Check if error indicates the configuration document does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use bms::{Error, PathError};
    /// use std::path::PathBuf;
    ///
    /// let err = Error::from(PathError::NotFound { path: PathBuf::from("/nonexistent") });
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Path(PathError::NotFound { .. }))
    }

    /// Check if error indicates the configuration path is a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Path(PathError::IsDirectory { .. }))
    }

    /// Check if error is an aggregated validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validator::FieldError;

    #[test]
    fn test_not_found_error() {
        let err = Error::from(PathError::NotFound {
            path: PathBuf::from("/etc/bms/config.toml"),
        });
        let display = format!("{err}");
        assert!(display.contains("config file not found"));
        assert!(display.contains("config.toml"));
        assert!(err.is_not_found());
        assert!(!err.is_directory());
    }

    #[test]
    fn test_is_directory_error() {
        let err = Error::from(PathError::IsDirectory {
            path: PathBuf::from("/etc/bms"),
        });
        let display = format!("{err}");
        assert!(display.contains("is a directory"));
        assert!(err.is_directory());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_error_names_path_and_keys() {
        let err = Error::Decode {
            path: PathBuf::from("config.toml"),
            source: DecodeError::UnknownKeys(vec!["server.unknown".to_string()]),
        };
        let display = format!("{err}");
        assert!(display.contains("config.toml"));
        assert!(display.contains("invalid config keys"));
        assert!(display.contains("server.unknown"));
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let errors = ValidationErrors::from(vec![
            FieldError::new("database.dsn", "is required when database.driver is set"),
            FieldError::new("sync.mode", "must be local or remote"),
        ]);
        let err = Error::Validation {
            errors,
            diagnostics: Box::default(),
        };
        let display = format!("{err}");
        assert!(display.starts_with("config validation failed"));
        assert!(display.contains("database.dsn"));
        assert!(display.contains("; sync.mode"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_log_setting_error() {
        let err = Error::InvalidLogSetting {
            field: "format",
            value: "xml".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid log format: \"xml\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::ConfigDirUnavailable)
        }

        assert!(returns_result().is_err());
    }
}
