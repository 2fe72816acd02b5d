//! Documented default values.
//!
//! Only the values listed here are populated; every other field keeps its
//! zero value so that later sources decide the final behaviour.

use crate::config::schema::{Config, TokenStorage};

/// Default auth token lifetime.
pub const DEFAULT_TOKEN_TTL: &str = "168h";

/// Default token rotation threshold, as a fraction of the token lifetime.
pub const DEFAULT_REFRESH_BEFORE_EXPIRY: f64 = 0.8;

/// Default token persistence target.
pub const DEFAULT_TOKEN_STORAGE: TokenStorage = TokenStorage::Keychain;

/// Returns the baseline configuration every resolution starts from.
///
/// # Examples
///
/// ```
/// use bms::config::{default_config, TokenStorage};
///
/// let config = default_config();
/// assert_eq!(config.auth.token_ttl, "168h");
/// assert_eq!(config.auth.token_storage, TokenStorage::Keychain);
/// assert!(config.server.id.is_empty());
/// ```
#[must_use]
pub fn default_config() -> Config {
    let mut config = Config::default();
    config.auth.refresh_before_expiry = DEFAULT_REFRESH_BEFORE_EXPIRY;
    config.auth.token_storage = DEFAULT_TOKEN_STORAGE;
    config.auth.token_ttl = DEFAULT_TOKEN_TTL.to_string();
    config.client.auth.refresh_before_expiry = DEFAULT_REFRESH_BEFORE_EXPIRY;
    config
}
