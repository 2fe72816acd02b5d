//! CLI command implementations.
//!
//! - `check`: Resolve, validate and log the configuration
//! - `show`: Print the redacted resolved configuration
//! - `path`: Print the configuration document path

pub mod check;
pub mod path;
pub mod show;

pub use check::CheckCommand;
pub use path::PathCommand;
pub use show::ShowCommand;
