#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # bms
//!
//! Layered configuration resolution for the bms client and server.
//!
//! The effective configuration is built from built-in defaults, a strictly
//! decoded TOML document, `BMS_*` environment variables, a CLI overlay and
//! allowlisted server overrides, in that order. The result is validated as a
//! whole and every violated rule is reported at once.
//!
//! ## Core Types
//!
//! - [`Config`] and [`ConfigOverlay`]: The resolved configuration and its
//!   partial, per-source counterpart
//! - [`ConfigResolver`]: The resolution pipeline
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`]: Structured stderr logging
//!
//! ## Examples
//!
//! ```
//! use bms::{ConfigOverlay, ConfigResolver, Error};
//! use std::io::Write;
//!
//! let mut file = tempfile::NamedTempFile::new().unwrap();
//! writeln!(file, "[database]\ndriver = \"sqlite\"\ndsn = \"file:bms.db\"").unwrap();
//!
//! let diagnostics = ConfigResolver::new()
//!     .with_path(file.path())
//!     .skip_env()
//!     .resolve_diagnostics()
//!     .unwrap();
//! assert_eq!(diagnostics.config.database.dsn, "file:bms.db");
//! assert!(diagnostics.warnings.is_empty());
//!
//! // Every violation is reported, and the resolved configuration survives.
//! writeln!(file, "[sync]\nenabled = true").unwrap();
//! let err = ConfigResolver::new()
//!     .with_path(file.path())
//!     .skip_env()
//!     .resolve_diagnostics()
//!     .unwrap_err();
//! assert!(matches!(err, Error::Validation { .. }));
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigOverlay, ConfigResolver, Diagnostics, Resolved};
pub use diagnostics::log_config_diagnostics;
pub use error::{Error, PathError, Result};
pub use logging::{init_logger, Component, Logger, LoggerDefaults};
