//! Overlay merging.
//!
//! Applies a [`ConfigOverlay`] onto a base [`Config`], one function per
//! section. An absent section leaves the base section untouched; inside a
//! present section every `Some` leaf replaces the base leaf, including
//! explicit `false`, `0` and `""`. Merging cannot fail.

use crate::config::overlay::{
    AuthOverlay, ClientAuthOverlay, ClientOverlay, ClientServerOverlay, ConfigOverlay,
    DatabaseOverlay, DevicePairingOverlay, IntegrationsOverlay, KeyStorageOverlay,
    ListenerOverlay, LoggingOverlay, NamedOverlay, PluginsOverlay, RecoveryOverlay,
    RemoteAuthOverlay, ServerOverlay, SyncOverlay, TelemetryOverlay, ToggleOverlay,
};
use crate::config::schema::{
    AuthConfig, ClientAuthConfig, ClientConfig, ClientServerConfig, Config, DatabaseConfig,
    DevicePairingConfig, IntegrationsConfig, KeyStorageConfig, ListenerConfig, LoggingConfig,
    NamedConfig, PluginsConfig, RecoveryConfig, RemoteAuthConfig, ServerConfig, SyncConfig,
    TelemetryConfig, ToggleConfig,
};

/// Applies overlays to configurations.
///
/// # Examples
///
/// ```
/// use bms::config::{Config, ConfigMerger, ConfigOverlay, SyncConfig, SyncMode, SyncOverlay};
///
/// let mut base = Config::default();
/// base.sync = SyncConfig { enabled: true, mode: SyncMode::Remote };
///
/// let overlay = ConfigOverlay {
///     sync: Some(SyncOverlay { enabled: Some(false), mode: None }),
///     ..Default::default()
/// };
///
/// let merged = ConfigMerger::apply(base, &overlay);
/// assert!(!merged.sync.enabled);
/// assert_eq!(merged.sync.mode, SyncMode::Remote);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge an overlay into a base configuration, returning the result.
    #[must_use]
    pub fn apply(mut base: Config, overlay: &ConfigOverlay) -> Config {
        if let Some(server) = &overlay.server {
            base.server = Self::merge_server(base.server, server);
        }
        if let Some(database) = &overlay.database {
            base.database = Self::merge_database(base.database, database);
        }
        if let Some(auth) = &overlay.auth {
            base.auth = Self::merge_auth(base.auth, auth);
        }
        if let Some(logging) = &overlay.logging {
            base.logging = Self::merge_logging(base.logging, logging);
        }
        if let Some(grpc) = &overlay.grpc {
            base.grpc = Self::merge_listener(base.grpc, grpc);
        }
        if let Some(rest) = &overlay.rest {
            base.rest = Self::merge_listener(base.rest, rest);
        }
        if let Some(websocket) = &overlay.websocket {
            base.websocket = Self::merge_listener(base.websocket, websocket);
        }
        if let Some(integrations) = &overlay.integrations {
            base.integrations = Self::merge_integrations(base.integrations, integrations);
        }
        if let Some(plugins) = &overlay.plugins {
            base.plugins = Self::merge_plugins(base.plugins, plugins);
        }
        if let Some(sync) = &overlay.sync {
            base.sync = Self::merge_sync(base.sync, sync);
        }
        if let Some(telemetry) = &overlay.telemetry {
            base.telemetry = Self::merge_telemetry(base.telemetry, telemetry);
        }
        if let Some(client) = &overlay.client {
            base.client = Self::merge_client(base.client, client);
        }

        base
    }

    // Server-side sections

    fn merge_server(mut base: ServerConfig, overlay: &ServerOverlay) -> ServerConfig {
        if let Some(environment) = &overlay.environment {
            base.environment.clone_from(environment);
        }
        if let Some(id) = &overlay.id {
            base.id.clone_from(id);
        }
        base
    }

    fn merge_database(mut base: DatabaseConfig, overlay: &DatabaseOverlay) -> DatabaseConfig {
        if let Some(dsn) = &overlay.dsn {
            base.dsn.clone_from(dsn);
        }
        if let Some(driver) = &overlay.driver {
            base.driver.clone_from(driver);
        }
        if let Some(migrations) = &overlay.migrations {
            base.migrations.clone_from(migrations);
        }
        base
    }

    fn merge_logging(mut base: LoggingConfig, overlay: &LoggingOverlay) -> LoggingConfig {
        if let Some(format) = &overlay.format {
            base.format.clone_from(format);
        }
        if let Some(level) = &overlay.level {
            base.level.clone_from(level);
        }
        base
    }

    fn merge_listener(mut base: ListenerConfig, overlay: &ListenerOverlay) -> ListenerConfig {
        if let Some(address) = &overlay.address {
            base.address.clone_from(address);
        }
        base
    }

    fn merge_integrations(
        mut base: IntegrationsConfig,
        overlay: &IntegrationsOverlay,
    ) -> IntegrationsConfig {
        if let Some(clublog) = &overlay.clublog {
            base.clublog = Self::merge_toggle(base.clublog, clublog);
        }
        if let Some(lotw) = &overlay.lotw {
            base.lotw = Self::merge_toggle(base.lotw, lotw);
        }
        if let Some(qrz) = &overlay.qrz {
            base.qrz = Self::merge_toggle(base.qrz, qrz);
        }
        base
    }

    fn merge_plugins(mut base: PluginsConfig, overlay: &PluginsOverlay) -> PluginsConfig {
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        if let Some(path) = &overlay.path {
            base.path.clone_from(path);
        }
        base
    }

    fn merge_sync(mut base: SyncConfig, overlay: &SyncOverlay) -> SyncConfig {
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        if let Some(mode) = &overlay.mode {
            base.mode.clone_from(mode);
        }
        base
    }

    fn merge_telemetry(mut base: TelemetryConfig, overlay: &TelemetryOverlay) -> TelemetryConfig {
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        if let Some(endpoint) = &overlay.endpoint {
            base.endpoint.clone_from(endpoint);
        }
        base
    }

    fn merge_toggle(mut base: ToggleConfig, overlay: &ToggleOverlay) -> ToggleConfig {
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        base
    }

    // Auth sections

    fn merge_auth(mut base: AuthConfig, overlay: &AuthOverlay) -> AuthConfig {
        if let Some(device_pairing) = &overlay.device_pairing {
            base.device_pairing = Self::merge_device_pairing(base.device_pairing, device_pairing);
        }
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        if let Some(key_auth) = &overlay.key_auth {
            base.key_auth = Self::merge_toggle(base.key_auth, key_auth);
        }
        if let Some(key_storage) = &overlay.key_storage {
            base.key_storage = Self::merge_key_storage(base.key_storage, key_storage);
        }
        if let Some(local_trust) = &overlay.local_trust {
            base.local_trust = Self::merge_toggle(base.local_trust, local_trust);
        }
        if let Some(mode) = &overlay.mode {
            base.mode.clone_from(mode);
        }
        if let Some(password_auth) = &overlay.password_auth {
            base.password_auth = Self::merge_toggle(base.password_auth, password_auth);
        }
        if let Some(recovery) = &overlay.recovery {
            base.recovery = Self::merge_recovery(base.recovery, recovery);
        }
        if let Some(refresh) = overlay.refresh_before_expiry {
            base.refresh_before_expiry = refresh;
        }
        if let Some(remote) = &overlay.remote {
            base.remote = Self::merge_remote_auth(base.remote, remote);
        }
        if let Some(token_storage) = &overlay.token_storage {
            base.token_storage.clone_from(token_storage);
        }
        if let Some(token_ttl) = &overlay.token_ttl {
            base.token_ttl.clone_from(token_ttl);
        }
        base
    }

    fn merge_device_pairing(
        mut base: DevicePairingConfig,
        overlay: &DevicePairingOverlay,
    ) -> DevicePairingConfig {
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        if let Some(qr) = overlay.qr {
            base.qr = qr;
        }
        if let Some(require_local) = overlay.require_local {
            base.require_local = require_local;
        }
        base
    }

    fn merge_key_storage(
        mut base: KeyStorageConfig,
        overlay: &KeyStorageOverlay,
    ) -> KeyStorageConfig {
        if let Some(allow_unencrypted) = overlay.allow_unencrypted {
            base.allow_unencrypted = allow_unencrypted;
        }
        if let Some(encrypted) = overlay.encrypted {
            base.encrypted = encrypted;
        }
        base
    }

    fn merge_recovery(mut base: RecoveryConfig, overlay: &RecoveryOverlay) -> RecoveryConfig {
        if let Some(codes) = overlay.codes {
            base.codes = codes;
        }
        if let Some(enabled) = overlay.enabled {
            base.enabled = enabled;
        }
        base
    }

    fn merge_remote_auth(
        mut base: RemoteAuthConfig,
        overlay: &RemoteAuthOverlay,
    ) -> RemoteAuthConfig {
        if let Some(endpoint) = &overlay.endpoint {
            base.endpoint.clone_from(endpoint);
        }
        base
    }

    // Client sections

    fn merge_client(mut base: ClientConfig, overlay: &ClientOverlay) -> ClientConfig {
        if let Some(auth) = &overlay.auth {
            base.auth = Self::merge_client_auth(base.auth, auth);
        }
        if let Some(keymap) = &overlay.keymap {
            base.keymap = Self::merge_named(base.keymap, keymap);
        }
        if let Some(offline) = &overlay.offline {
            base.offline = Self::merge_toggle(base.offline, offline);
        }
        if let Some(plugins) = &overlay.plugins {
            base.plugins = Self::merge_plugins(base.plugins, plugins);
        }
        if let Some(server) = &overlay.server {
            base.server = Self::merge_client_server(base.server, server);
        }
        if let Some(theme) = &overlay.theme {
            base.theme = Self::merge_named(base.theme, theme);
        }
        base
    }

    fn merge_client_auth(mut base: ClientAuthConfig, overlay: &ClientAuthOverlay) -> ClientAuthConfig {
        if let Some(refresh) = overlay.refresh_before_expiry {
            base.refresh_before_expiry = refresh;
        }
        if let Some(store_token) = overlay.store_token {
            base.store_token = store_token;
        }
        if let Some(token) = &overlay.token {
            base.token.clone_from(token);
        }
        base
    }

    fn merge_named(mut base: NamedConfig, overlay: &NamedOverlay) -> NamedConfig {
        if let Some(name) = &overlay.name {
            base.name.clone_from(name);
        }
        base
    }

    fn merge_client_server(
        mut base: ClientServerConfig,
        overlay: &ClientServerOverlay,
    ) -> ClientServerConfig {
        if let Some(address) = &overlay.address {
            base.address.clone_from(address);
        }
        if let Some(rest) = &overlay.rest {
            base.rest.clone_from(rest);
        }
        base
    }
}
