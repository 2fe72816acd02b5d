//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options, the configuration overlay flags and
//! subcommands.

use crate::commands::{CheckCommand, PathCommand, ShowCommand};
use bms::config::{
    AuthMode, AuthOverlay, ConfigOverlay, DatabaseDriver, DatabaseOverlay, Environment,
    LogFormat, LogLevel, LoggingOverlay, ServerOverlay, SyncMode, SyncOverlay,
};
use bms::Component;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Resolve and inspect the bms configuration.
#[derive(Parser)]
#[command(name = "bms")]
#[command(version, about = "Resolve and inspect bms configuration", long_about = None)]
pub struct Cli {
    /// Configuration document to load instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Which side of bms the configuration is resolved for
    #[arg(long, value_enum, default_value_t = Role::Client, global = true)]
    pub role: Role,

    #[command(flatten)]
    pub overlay: OverlayArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve, validate and log the configuration
    Check(CheckCommand),

    /// Print the redacted resolved configuration
    Show(ShowCommand),

    /// Print the configuration document path
    Path(PathCommand),
}

/// Process role, selecting the log component and default log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Interactive client; text logs by default.
    Client,
    /// Long-running server; JSON logs by default.
    Server,
}

impl Role {
    /// Logging component for this role.
    pub fn component(self) -> Component {
        match self {
            Role::Client => Component::Cli,
            Role::Server => Component::Server,
        }
    }
}

/// Flags that override individual configuration fields.
///
/// Only flags that are given end up in the overlay; an explicit empty value
/// still overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct OverlayArgs {
    /// Override server.id
    #[arg(long, value_name = "ID", global = true)]
    pub server_id: Option<String>,

    /// Override server.environment (local, remote)
    #[arg(long, value_name = "ENV", global = true)]
    pub environment: Option<String>,

    /// Override database.driver (sqlite, postgres)
    #[arg(long, value_name = "DRIVER", global = true)]
    pub database_driver: Option<String>,

    /// Override database.dsn
    #[arg(long, value_name = "DSN", global = true)]
    pub database_dsn: Option<String>,

    /// Override auth.mode (local, remote, hybrid)
    #[arg(long, value_name = "MODE", global = true)]
    pub auth_mode: Option<String>,

    /// Override sync.mode (local, remote)
    #[arg(long, value_name = "MODE", global = true)]
    pub sync_mode: Option<String>,

    /// Override logging.level (debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Override logging.format (text, json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub log_format: Option<String>,
}

impl OverlayArgs {
    /// Build the CLI overlay from the given flags.
    ///
    /// Values are passed through unchecked; the validator and the logger
    /// report values outside the accepted sets.
    pub fn to_overlay(&self) -> ConfigOverlay {
        let server = (self.server_id.is_some() || self.environment.is_some()).then(|| {
            ServerOverlay {
                environment: self.environment.as_deref().map(Environment::from),
                id: self.server_id.clone(),
            }
        });

        let database = (self.database_driver.is_some() || self.database_dsn.is_some()).then(|| {
            DatabaseOverlay {
                dsn: self.database_dsn.clone(),
                driver: self.database_driver.as_deref().map(DatabaseDriver::from),
                migrations: None,
            }
        });

        let auth = self.auth_mode.as_deref().map(|mode| AuthOverlay {
            mode: Some(AuthMode::from(mode)),
            ..Default::default()
        });

        let sync = self.sync_mode.as_deref().map(|mode| SyncOverlay {
            enabled: None,
            mode: Some(SyncMode::from(mode)),
        });

        let logging = (self.log_level.is_some() || self.log_format.is_some()).then(|| {
            LoggingOverlay {
                format: self.log_format.as_deref().map(LogFormat::from),
                level: self.log_level.as_deref().map(LogLevel::from),
            }
        });

        ConfigOverlay {
            server,
            database,
            auth,
            logging,
            sync,
            ..Default::default()
        }
    }
}
