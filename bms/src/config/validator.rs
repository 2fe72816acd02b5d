//! Configuration validation.
//!
//! Runs after resolution. Every rule is evaluated and every violation is
//! collected, so a single pass reports all problems in a fixed order:
//! database, auth, sync, then auth durations.

use std::fmt;

use serde::Serialize;

use crate::config::duration::parse_duration;
use crate::config::schema::{
    AuthConfig, AuthMode, Config, DatabaseConfig, Environment, ServerConfig,
    SyncConfig,
};

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.path.is_empty(), self.message.is_empty()) {
            (true, _) => f.write_str(&self.message),
            (false, true) => f.write_str(&self.path),
            (false, false) => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// Every violated constraint, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Returns true when no constraint was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns true when any violation names `path`.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    fn push(&mut self, path: &str, message: &str) {
        self.0.push(FieldError::new(path, message));
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates resolved configurations.
///
/// # Examples
///
/// ```
/// use bms::config::{default_config, ConfigValidator, DatabaseDriver};
///
/// let mut config = default_config();
/// config.database.driver = DatabaseDriver::Sqlite;
/// config.database.dsn = "file:bms.db".to_string();
/// ConfigValidator::validate(&config).unwrap();
///
/// config.database.dsn.clear();
/// let errors = ConfigValidator::validate(&config).unwrap_err();
/// assert_eq!(errors.to_string(), "database.dsn: is required when database.driver is set");
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint when at least one rule fails.
    pub fn validate(config: &Config) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        Self::validate_database(&config.database, &mut errors);
        Self::validate_auth(&config.auth, &config.server, &mut errors);
        Self::validate_sync(&config.sync, &mut errors);
        Self::validate_auth_durations(&config.auth, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The DSN rule only applies once the driver itself is valid.
    fn validate_database(database: &DatabaseConfig, errors: &mut ValidationErrors) {
        if !database.driver.is_known() {
            errors.push("database.driver", "must be sqlite or postgres");
            return;
        }
        if database.dsn.is_empty() {
            errors.push("database.dsn", "is required when database.driver is set");
        }
    }

    fn validate_auth(auth: &AuthConfig, server: &ServerConfig, errors: &mut ValidationErrors) {
        if auth.enabled && !auth.key_auth.enabled && !auth.password_auth.enabled {
            errors.push(
                "auth.enabled",
                "requires auth.key_auth.enabled or auth.password_auth.enabled",
            );
        }

        if matches!(auth.mode, AuthMode::Other(_)) {
            errors.push("auth.mode", "must be local, remote, or hybrid");
        }

        if auth.mode == AuthMode::Remote && auth.remote.endpoint.is_empty() {
            errors.push("auth.remote.endpoint", "is required when auth.mode is remote");
        }

        if auth.local_trust.enabled
            && (server.environment != Environment::Local || auth.mode != AuthMode::Local)
        {
            errors.push(
                "auth.local_trust.enabled",
                "requires server.environment=local and auth.mode=local",
            );
        }
    }

    fn validate_sync(sync: &SyncConfig, errors: &mut ValidationErrors) {
        if sync.enabled && sync.mode.is_unset() {
            errors.push("sync.mode", "is required when sync.enabled is true");
        }
        if !sync.mode.is_unset() && !sync.mode.is_known() {
            errors.push("sync.mode", "must be local or remote");
        }
    }

    fn validate_auth_durations(auth: &AuthConfig, errors: &mut ValidationErrors) {
        if auth.token_ttl.is_empty() {
            errors.push("auth.token_ttl", "must be a duration string");
        } else if parse_duration(&auth.token_ttl).is_none() {
            errors.push("auth.token_ttl", "must be a valid duration");
        }

        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&auth.refresh_before_expiry) {
            errors.push("auth.refresh_before_expiry", "must be between 0 and 1");
        }
    }
}
