//! Utility functions for CLI operations.
//!
//! This module holds the options shared by every command and the helpers
//! that turn them into a configuration resolver and loggers.

use crate::cli::Role;
use bms::config::{default_config, Config, ConfigMerger, ConfigOverlay, ConfigResolver};
use bms::{Component, Logger, LoggerDefaults};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Explicit configuration document.
    pub config: Option<PathBuf>,

    /// Process role.
    pub role: Role,

    /// Overlay built from the field override flags.
    pub overlay: ConfigOverlay,
}

impl GlobalOptions {
    /// Logging component for the selected role.
    pub fn component(&self) -> Component {
        self.role.component()
    }

    /// Build a resolver for these options.
    ///
    /// Resolution reads the process environment. The CLI never sends server
    /// overrides; those come from a connected server.
    pub fn resolver(&self) -> ConfigResolver {
        let resolver = ConfigResolver::new().with_cli_overlay(self.overlay.clone());
        match &self.config {
            Some(path) => resolver.with_path(path),
            None => resolver,
        }
    }

    /// Built-in defaults with only the command-line flags applied.
    ///
    /// Used for logging before, or instead of, a resolved configuration.
    pub fn flag_config(&self) -> Config {
        ConfigMerger::apply(default_config(), &self.overlay)
    }

    /// Install a global logger for library records emitted during resolution.
    ///
    /// It honours `--log-level` and `--log-format`; unusable values fall back
    /// silently, since the resolved logger reports them later.
    pub fn install_resolution_logger(&self) {
        let config = self.flag_config();
        let defaults = LoggerDefaults::for_component(self.component(), &config);
        let logger =
            Logger::from_config(&config.logging, &defaults).unwrap_or_else(|_| Logger::fallback());
        // Only fails when a logger is already installed.
        let _ = logger.install();
    }
}
