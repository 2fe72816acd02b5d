//! Environment variable handling for configuration overrides.
//!
//! This module maps the `BMS_*` variables onto an overlay. Unset and empty
//! variables are ignored, so exporting `BMS_SERVER_ID=` never clears a value
//! from the document.

use std::collections::HashMap;
use std::env;

use crate::config::merger::ConfigMerger;
use crate::config::overlay::{
    AuthOverlay, ConfigOverlay, DatabaseOverlay, ServerOverlay, SyncOverlay,
};
use crate::config::schema::Config;

/// Overrides `server.id`.
pub const ENV_SERVER_ID: &str = "BMS_SERVER_ID";
/// Overrides `database.dsn`.
pub const ENV_DATABASE_DSN: &str = "BMS_DATABASE_DSN";
/// Overrides `database.driver`.
pub const ENV_DATABASE_DRIVER: &str = "BMS_DATABASE_DRIVER";
/// Overrides `auth.mode`.
pub const ENV_AUTH_MODE: &str = "BMS_AUTH_MODE";
/// Overrides `sync.mode`.
pub const ENV_SYNC_MODE: &str = "BMS_SYNC_MODE";
/// Overrides the configuration document path.
pub const ENV_CONFIG_PATH: &str = "BMS_CONFIG";

/// Where environment variables are read from.
///
/// # Examples
///
/// ```
/// use bms::config::EnvSource;
///
/// let env = EnvSource::from_pairs([("BMS_SERVER_ID", "alpha"), ("BMS_SYNC_MODE", "")]);
/// assert_eq!(env.get("BMS_SERVER_ID").as_deref(), Some("alpha"));
/// assert_eq!(env.get("BMS_SYNC_MODE"), None);
/// assert_eq!(EnvSource::None.get("HOME"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The process environment.
    #[default]
    Process,
    /// A fixed set of variables.
    Vars(HashMap<String, String>),
    /// No variables at all.
    None,
}

impl EnvSource {
    /// Build a fixed source from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Vars(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Look up a variable, treating unset, empty and non-UTF-8 values alike.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            Self::Process => env::var(key).ok(),
            Self::Vars(vars) => vars.get(key).cloned(),
            Self::None => None,
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```
/// use bms::config::{default_config, EnvSource, EnvironmentConfig, SyncMode};
///
/// let env = EnvSource::from_pairs([("BMS_SYNC_MODE", "remote")]);
/// let config = EnvironmentConfig::apply(default_config(), &env);
/// assert_eq!(config.sync.mode, SyncMode::Remote);
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Build an overlay holding only the variables that are set.
    #[must_use]
    pub fn overlay(env: &EnvSource) -> ConfigOverlay {
        let mut overlay = ConfigOverlay::default();

        if let Some(id) = env.get(ENV_SERVER_ID) {
            overlay.server = Some(ServerOverlay {
                id: Some(id),
                ..Default::default()
            });
        }

        let dsn = env.get(ENV_DATABASE_DSN);
        let driver = env.get(ENV_DATABASE_DRIVER);
        if dsn.is_some() || driver.is_some() {
            overlay.database = Some(DatabaseOverlay {
                dsn,
                driver: driver.map(Into::into),
                ..Default::default()
            });
        }

        if let Some(mode) = env.get(ENV_AUTH_MODE) {
            overlay.auth = Some(AuthOverlay {
                mode: Some(mode.into()),
                ..Default::default()
            });
        }

        if let Some(mode) = env.get(ENV_SYNC_MODE) {
            overlay.sync = Some(SyncOverlay {
                mode: Some(mode.into()),
                ..Default::default()
            });
        }

        overlay
    }

    /// Apply environment variable overrides to a configuration.
    #[must_use]
    pub fn apply(base: Config, env: &EnvSource) -> Config {
        let overlay = Self::overlay(env);
        if overlay.is_empty() {
            return base;
        }
        log::debug!("applying environment overrides: {}", Self::describe(&overlay));
        ConfigMerger::apply(base, &overlay)
    }

    // Names the variables that contributed, never their values.
    fn describe(overlay: &ConfigOverlay) -> String {
        let mut names = Vec::new();
        if overlay.server.is_some() {
            names.push(ENV_SERVER_ID);
        }
        if let Some(database) = &overlay.database {
            if database.dsn.is_some() {
                names.push(ENV_DATABASE_DSN);
            }
            if database.driver.is_some() {
                names.push(ENV_DATABASE_DRIVER);
            }
        }
        if overlay.auth.is_some() {
            names.push(ENV_AUTH_MODE);
        }
        if overlay.sync.is_some() {
            names.push(ENV_SYNC_MODE);
        }
        names.join(", ")
    }
}
