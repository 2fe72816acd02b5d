//! Command to print the redacted resolved configuration.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use bms::config::redact;
use clap::{Args, ValueEnum};

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// TOML document, loadable with `--config`.
    Toml,
    /// Pretty-printed JSON.
    Json,
}

/// Print the redacted resolved configuration.
///
/// The configuration is not validated, so an invalid setup can still be
/// inspected. Secrets are always masked.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = ShowFormat::Toml)]
    pub format: ShowFormat,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolved = global.resolver().resolve()?;
        let redacted = redact(&resolved.config);

        let rendered = match self.format {
            ShowFormat::Toml => toml::to_string_pretty(&redacted)?,
            ShowFormat::Json => serde_json::to_string_pretty(&redacted)?,
        };

        println!("{}", rendered.trim_end());
        Ok(())
    }
}
