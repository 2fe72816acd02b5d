//! Overlay types for partial configuration overrides.
//!
//! An overlay mirrors [`Config`](super::Config) with every leaf and every
//! subsection wrapped in `Option`. `None` leaves the base untouched;
//! `Some(value)` sets exactly `value`, including `false`, `0` and `""`.

use serde::Deserialize;

use crate::config::schema::{
    AuthMode, DatabaseDriver, Environment, LogFormat, LogLevel, SyncMode, TokenStorage,
};

/// Overlay root.
///
/// # Examples
///
/// ```
/// use bms::config::{ConfigOverlay, SyncOverlay};
///
/// let overlay = ConfigOverlay {
///     sync: Some(SyncOverlay {
///         enabled: Some(false),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert!(overlay.server.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverlay {
    /// Server overrides.
    pub server: Option<ServerOverlay>,
    /// Database overrides.
    pub database: Option<DatabaseOverlay>,
    /// Authentication overrides.
    pub auth: Option<AuthOverlay>,
    /// Logging overrides.
    pub logging: Option<LoggingOverlay>,
    /// gRPC listener overrides.
    pub grpc: Option<ListenerOverlay>,
    /// REST listener overrides.
    pub rest: Option<ListenerOverlay>,
    /// WebSocket listener overrides.
    pub websocket: Option<ListenerOverlay>,
    /// Integration overrides.
    pub integrations: Option<IntegrationsOverlay>,
    /// Plugin overrides.
    pub plugins: Option<PluginsOverlay>,
    /// Sync overrides.
    pub sync: Option<SyncOverlay>,
    /// Telemetry overrides.
    pub telemetry: Option<TelemetryOverlay>,
    /// Client overrides.
    pub client: Option<ClientOverlay>,
}

impl ConfigOverlay {
    /// Returns true when no section is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Server overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerOverlay {
    /// Runtime mode.
    pub environment: Option<Environment>,
    /// Instance identifier.
    pub id: Option<String>,
}

/// Database overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseOverlay {
    /// Connection string.
    pub dsn: Option<String>,
    /// Database engine.
    pub driver: Option<DatabaseDriver>,
    /// Migrations directory.
    pub migrations: Option<String>,
}

/// Authentication overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthOverlay {
    /// Device registration.
    pub device_pairing: Option<DevicePairingOverlay>,
    /// Toggle authentication.
    pub enabled: Option<bool>,
    /// Key-based login.
    pub key_auth: Option<ToggleOverlay>,
    /// Local key storage.
    pub key_storage: Option<KeyStorageOverlay>,
    /// Local-only passwordless access.
    pub local_trust: Option<ToggleOverlay>,
    /// Runtime auth mode.
    pub mode: Option<AuthMode>,
    /// Password login.
    pub password_auth: Option<ToggleOverlay>,
    /// Recovery codes.
    pub recovery: Option<RecoveryOverlay>,
    /// Token rotation threshold.
    pub refresh_before_expiry: Option<f64>,
    /// Delegated authentication.
    pub remote: Option<RemoteAuthOverlay>,
    /// Token persistence target.
    pub token_storage: Option<TokenStorage>,
    /// Token lifetime.
    pub token_ttl: Option<String>,
}

/// Device pairing overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevicePairingOverlay {
    /// Toggle pairing.
    pub enabled: Option<bool>,
    /// QR-based pairing hints.
    pub qr: Option<bool>,
    /// Local-only pairing.
    pub require_local: Option<bool>,
}

/// Overrides for a section holding a single `enabled` switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToggleOverlay {
    /// Toggle the feature.
    pub enabled: Option<bool>,
}

/// Local key storage overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyStorageOverlay {
    /// Allow unencrypted storage.
    pub allow_unencrypted: Option<bool>,
    /// Encrypt stored keys.
    pub encrypted: Option<bool>,
}

/// Recovery code overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecoveryOverlay {
    /// Number of codes.
    pub codes: Option<i64>,
    /// Toggle recovery codes.
    pub enabled: Option<bool>,
}

/// Delegated authentication overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteAuthOverlay {
    /// Delegated auth endpoint.
    pub endpoint: Option<String>,
}

/// Logging overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingOverlay {
    /// Output format.
    pub format: Option<LogFormat>,
    /// Minimum level.
    pub level: Option<LogLevel>,
}

/// Transport listener overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerOverlay {
    /// Bind address.
    pub address: Option<String>,
}

/// Integration overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationsOverlay {
    /// Club Log.
    pub clublog: Option<ToggleOverlay>,
    /// Logbook of The World.
    pub lotw: Option<ToggleOverlay>,
    /// QRZ.com.
    pub qrz: Option<ToggleOverlay>,
}

/// Plugin overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsOverlay {
    /// Toggle plugin loading.
    pub enabled: Option<bool>,
    /// Plugin directory.
    pub path: Option<String>,
}

/// Sync overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncOverlay {
    /// Toggle sync.
    pub enabled: Option<bool>,
    /// Sync runtime mode.
    pub mode: Option<SyncMode>,
}

/// Telemetry overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryOverlay {
    /// Toggle telemetry.
    pub enabled: Option<bool>,
    /// Collector endpoint.
    pub endpoint: Option<String>,
}

/// Client overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOverlay {
    /// Token persistence.
    pub auth: Option<ClientAuthOverlay>,
    /// Keymap selection.
    pub keymap: Option<NamedOverlay>,
    /// Offline mode.
    pub offline: Option<ToggleOverlay>,
    /// Client plugins.
    pub plugins: Option<PluginsOverlay>,
    /// Server endpoints.
    pub server: Option<ClientServerOverlay>,
    /// Theme selection.
    pub theme: Option<NamedOverlay>,
}

/// Client token persistence overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientAuthOverlay {
    /// Token refresh threshold.
    pub refresh_before_expiry: Option<f64>,
    /// Persist the token locally.
    pub store_token: Option<bool>,
    /// Auth token value.
    pub token: Option<String>,
}

/// Overrides for a section selecting something by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamedOverlay {
    /// Selected name.
    pub name: Option<String>,
}

/// Client endpoint overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientServerOverlay {
    /// gRPC endpoint.
    pub address: Option<String>,
    /// REST endpoint.
    pub rest: Option<String>,
}
