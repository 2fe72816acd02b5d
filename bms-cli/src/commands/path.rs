//! Command to show the configuration document path.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use bms::config::ConfigLoader;
use clap::Args;

/// Print the configuration document path.
///
/// Uses the same lookup as resolution (`--config`, then `BMS_CONFIG`, then
/// the platform default) without checking that the file exists.
#[derive(Args)]
pub struct PathCommand {}

impl PathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = ConfigLoader::resolve_path(global.config.as_deref())?;
        println!("{}", path.display());
        Ok(())
    }
}
