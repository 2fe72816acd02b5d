//! Command to resolve, validate and log the configuration.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use bms::logging::FIELD_ERROR;
use bms::{init_logger, log_config_diagnostics, Error};
use clap::Args;
use serde_json::Value;

/// Logged when the resolved configuration breaks validation rules.
pub const MSG_VALIDATION_FAILED: &str = "config validation failed";
/// Logged when no configuration could be resolved.
pub const MSG_RESOLUTION_FAILED: &str = "config resolution failed";

/// Resolve, validate and log the configuration.
///
/// A valid configuration is logged with its warnings. When validation fails
/// the diagnostics are logged before the error record; resolution failures
/// log the error record alone, using a logger built from the flags.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        global.install_resolution_logger();

        let err = match global.resolver().resolve_diagnostics() {
            Ok(diagnostics) => {
                let logger = init_logger(&diagnostics.config, global.component());
                log_config_diagnostics(
                    &logger,
                    &diagnostics.config,
                    &diagnostics.path,
                    &diagnostics.warnings,
                );
                return Ok(());
            }
            Err(err) => err,
        };

        let (logger, message) = match &err {
            Error::Validation { diagnostics, .. } => {
                let logger = init_logger(&diagnostics.config, global.component());
                log_config_diagnostics(
                    &logger,
                    &diagnostics.config,
                    &diagnostics.path,
                    &diagnostics.warnings,
                );
                (logger, MSG_VALIDATION_FAILED)
            }
            _ => (
                init_logger(&global.flag_config(), global.component()),
                MSG_RESOLUTION_FAILED,
            ),
        };

        logger.error(message, &[(FIELD_ERROR, Value::from(err.to_string()))]);
        Err(CliError::Logged(Box::new(err.into())))
    }
}
