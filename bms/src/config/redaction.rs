//! Secret redaction for configuration summaries.

use crate::config::schema::Config;

/// Placeholder written over secret values.
pub const REDACTED_VALUE: &str = "[redacted]";

/// Return a copy of `config` that is safe to log.
///
/// `database.dsn` and `client.auth.token` are replaced with
/// [`REDACTED_VALUE`] when set; empty values stay empty so a summary still
/// shows that nothing was configured.
///
/// # Examples
///
/// ```
/// use bms::config::{redact, Config, REDACTED_VALUE};
///
/// let mut config = Config::default();
/// config.database.dsn = "postgres://user:secret@db/bms".to_string();
///
/// let redacted = redact(&config);
/// assert_eq!(redacted.database.dsn, REDACTED_VALUE);
/// assert_eq!(redacted.client.auth.token, "");
/// ```
#[must_use]
pub fn redact(config: &Config) -> Config {
    let mut redacted = config.clone();
    redact_value(&mut redacted.database.dsn);
    redact_value(&mut redacted.client.auth.token);
    redacted
}

fn redact_value(value: &mut String) {
    if !value.is_empty() {
        *value = REDACTED_VALUE.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;

    #[test]
    fn test_redacts_secrets_only() {
        let mut config = default_config();
        config.server.id = "bms-1".to_string();
        config.database.dsn = "postgres://user:pw@db".to_string();
        config.client.auth.token = "tok".to_string();

        let redacted = redact(&config);
        assert_eq!(redacted.database.dsn, REDACTED_VALUE);
        assert_eq!(redacted.client.auth.token, REDACTED_VALUE);

        let mut restored = redacted;
        restored.database.dsn.clone_from(&config.database.dsn);
        restored.client.auth.token.clone_from(&config.client.auth.token);
        assert_eq!(restored, config);
    }

    #[test]
    fn test_empty_secrets_stay_empty() {
        let config = default_config();
        assert_eq!(redact(&config), config);
    }

    #[test]
    fn test_input_is_untouched() {
        let mut config = default_config();
        config.database.dsn = "file:bms.db".to_string();
        let _ = redact(&config);
        assert_eq!(config.database.dsn, "file:bms.db");
    }
}
