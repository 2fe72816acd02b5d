//! Configuration schema definitions.
//!
//! This module defines the fully populated runtime configuration. Every leaf
//! holds a concrete value; the zero value of a field means "not configured".
//! Partial overrides are expressed with [`ConfigOverlay`](super::ConfigOverlay)
//! instead.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config::duration::parse_duration;

/// Declares a string-backed configuration enum.
///
/// The generated type keeps an explicit `Unset` value for the empty string
/// and an `Other` value for anything outside the declared set, so decoding
/// never rejects an enum value. Rejection is left to the validator.
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            /// Not configured (empty string).
            #[default]
            Unset,
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the declared set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Every declared value, in declaration order.
            pub const KNOWN: &'static [&'static str] = &[$($value),+];

            /// Returns the value as written in the configuration document.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    Self::Unset => "",
                    $( Self::$variant => $value, )+
                    Self::Other(value) => value,
                }
            }

            /// Returns true when no value is configured.
            #[must_use]
            pub fn is_unset(&self) -> bool {
                matches!(self, Self::Unset)
            }

            /// Returns true when the value is one of the declared values.
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unset | Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    "" => Self::Unset,
                    $( $value => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

config_enum! {
    /// Server runtime mode.
    pub enum Environment {
        /// Single-host deployment.
        Local => "local",
        /// Networked deployment.
        Remote => "remote",
    }
}

config_enum! {
    /// Database engine.
    pub enum DatabaseDriver {
        /// PostgreSQL.
        Postgres => "postgres",
        /// SQLite.
        Sqlite => "sqlite",
    }
}

config_enum! {
    /// Runtime authentication mode.
    pub enum AuthMode {
        /// Local and delegated authentication combined.
        Hybrid => "hybrid",
        /// Local authentication only.
        Local => "local",
        /// Delegated authentication through `auth.remote.endpoint`.
        Remote => "remote",
    }
}

config_enum! {
    /// Where issued auth tokens are persisted.
    pub enum TokenStorage {
        /// Inside the configuration document.
        Config => "config",
        /// In a dedicated token file.
        File => "file",
        /// In the platform keychain.
        Keychain => "keychain",
    }
}

config_enum! {
    /// Log output format.
    pub enum LogFormat {
        /// One JSON object per line.
        Json => "json",
        /// `key=value` text lines.
        Text => "text",
    }
}

config_enum! {
    /// Minimum log severity.
    pub enum LogLevel {
        /// Debug and above.
        Debug => "debug",
        /// Info and above.
        Info => "info",
        /// Warnings and errors.
        Warn => "warn",
        /// Errors only.
        Error => "error",
    }
}

config_enum! {
    /// Sync runtime mode.
    pub enum SyncMode {
        /// Sync between local stores.
        Local => "local",
        /// Sync against a remote server.
        Remote => "remote",
    }
}

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use bms::config::{Config, DatabaseDriver};
///
/// let mut config = Config::default();
/// config.database.driver = DatabaseDriver::Sqlite;
/// config.database.dsn = "file:bms.db".to_string();
/// assert_eq!(config.database.driver.as_str(), "sqlite");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Server instance settings.
    pub server: ServerConfig,
    /// Database connectivity settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
    /// gRPC listener.
    pub grpc: ListenerConfig,
    /// REST listener.
    pub rest: ListenerConfig,
    /// WebSocket listener.
    pub websocket: ListenerConfig,
    /// External integrations.
    pub integrations: IntegrationsConfig,
    /// Server-side plugins.
    pub plugins: PluginsConfig,
    /// Sync settings.
    pub sync: SyncConfig,
    /// Telemetry reporting.
    pub telemetry: TelemetryConfig,
    /// Client-side settings.
    pub client: ClientConfig,
}

impl Config {
    /// Parses `auth.token_ttl` as a duration.
    ///
    /// Returns `None` when the value is empty or not a valid duration.
    /// Negative lifetimes parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use bms::config::default_config;
    ///
    /// let mut config = default_config();
    /// assert_eq!(config.token_ttl(), Some(chrono::Duration::hours(168)));
    ///
    /// config.auth.token_ttl = "1h30m".to_string();
    /// assert_eq!(config.token_ttl(), Some(chrono::Duration::minutes(90)));
    /// ```
    #[must_use]
    pub fn token_ttl(&self) -> Option<Duration> {
        parse_duration(&self.auth.token_ttl)
    }
}

/// Server instance settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Runtime mode.
    pub environment: Environment,
    /// Instance identifier.
    pub id: String,
}

/// Database connectivity settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string for the selected driver. Secret.
    pub dsn: String,
    /// Database engine.
    pub driver: DatabaseDriver,
    /// Migrations directory.
    pub migrations: String,
}

/// Authentication and session settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Device registration.
    pub device_pairing: DevicePairingConfig,
    /// Toggle authentication.
    pub enabled: bool,
    /// Key-based login.
    pub key_auth: ToggleConfig,
    /// Local private key storage.
    pub key_storage: KeyStorageConfig,
    /// Local-only passwordless access.
    pub local_trust: ToggleConfig,
    /// Runtime auth mode.
    pub mode: AuthMode,
    /// Password login.
    pub password_auth: ToggleConfig,
    /// Recovery codes.
    pub recovery: RecoveryConfig,
    /// Fraction of the token lifetime after which it is rotated.
    pub refresh_before_expiry: f64,
    /// Delegated authentication.
    pub remote: RemoteAuthConfig,
    /// Token persistence target.
    pub token_storage: TokenStorage,
    /// Token lifetime as a duration string.
    pub token_ttl: String,
}

/// Device pairing settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevicePairingConfig {
    /// Toggle pairing.
    pub enabled: bool,
    /// Offer QR-based pairing hints.
    pub qr: bool,
    /// Only allow pairing from the local host.
    pub require_local: bool,
}

/// A section holding a single `enabled` switch.
///
/// Used for `auth.key_auth`, `auth.local_trust`, `auth.password_auth`,
/// the integrations and `client.offline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToggleConfig {
    /// Toggle the feature.
    pub enabled: bool,
}

/// Local private key storage settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyStorageConfig {
    /// Explicit opt-in to storing keys unencrypted.
    pub allow_unencrypted: bool,
    /// Encrypt stored private keys.
    pub encrypted: bool,
}

/// Recovery code settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Number of recovery codes to issue.
    pub codes: i64,
    /// Toggle recovery codes.
    pub enabled: bool,
}

/// Delegated authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteAuthConfig {
    /// Delegated auth endpoint.
    pub endpoint: String,
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Minimum level.
    pub level: LogLevel,
}

/// Transport listener settings, shared by gRPC, REST and WebSocket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    /// Bind address.
    pub address: String,
}

/// External integration settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationsConfig {
    /// Club Log.
    pub clublog: ToggleConfig,
    /// Logbook of The World.
    pub lotw: ToggleConfig,
    /// QRZ.com.
    pub qrz: ToggleConfig,
}

/// Plugin loading settings, shared by server and client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsConfig {
    /// Toggle plugin loading.
    pub enabled: bool,
    /// Plugin directory.
    pub path: String,
}

/// Sync settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Toggle sync.
    pub enabled: bool,
    /// Sync runtime mode.
    pub mode: SyncMode,
}

/// Telemetry reporting settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Toggle telemetry.
    pub enabled: bool,
    /// Optional collector endpoint.
    pub endpoint: String,
}

/// Client-side settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Token persistence.
    pub auth: ClientAuthConfig,
    /// Keymap selection.
    pub keymap: NamedConfig,
    /// Offline mode.
    pub offline: ToggleConfig,
    /// Client plugins.
    pub plugins: PluginsConfig,
    /// Server endpoints.
    pub server: ClientServerConfig,
    /// Theme selection.
    pub theme: NamedConfig,
}

/// Client-side token persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientAuthConfig {
    /// Fraction of the token lifetime after which it is refreshed.
    pub refresh_before_expiry: f64,
    /// Persist the auth token locally.
    pub store_token: bool,
    /// Auth token value. Secret.
    pub token: String,
}

/// A section selecting something by name (keymap, theme).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamedConfig {
    /// Selected name.
    pub name: String,
}

/// Client endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientServerConfig {
    /// gRPC endpoint.
    pub address: String,
    /// REST endpoint.
    pub rest: String,
}
