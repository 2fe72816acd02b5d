//! Configuration system for bms.
//!
//! This module resolves the effective configuration for the bms client and
//! server from layered sources:
//! - Built-in defaults
//! - A TOML configuration document, decoded strictly
//! - Environment variable overrides
//! - A CLI overlay
//! - Server-required overrides, reduced to an allowlist
//!
//! # Configuration Precedence
//!
//! Configuration is merged from the following sources (highest to lowest):
//!
//! 1. Server overrides (`auth.enabled`, `auth.mode`, `sync.enabled`,
//!    `sync.mode` only)
//! 2. CLI overlay
//! 3. Environment variables (`BMS_*`)
//! 4. The configuration document (`--config`, `BMS_CONFIG`, or
//!    `<config dir>/bms/config.toml`)
//! 5. Built-in defaults
//!
//! # Overlays
//!
//! Every source except the defaults is a [`ConfigOverlay`]: the same shape as
//! [`Config`] with every leaf optional. A leaf that is `Some(false)`,
//! `Some(0)` or `Some("")` overrides; only `None` leaves the lower layer in
//! place.
//!
//! # Examples
//!
//! ```no_run
//! use bms::config::{resolve_diagnostics, ConfigOverlay};
//!
//! let empty = ConfigOverlay::default();
//! let diagnostics = resolve_diagnostics(None, &empty, &empty).unwrap();
//! println!("loaded {}", diagnostics.path.display());
//! ```
//!
//! Resolving against a fixed environment:
//!
//! ```
//! use bms::config::{ConfigResolver, EnvSource, SyncMode};
//! use std::io::Write;
//!
//! let mut file = tempfile::NamedTempFile::new().unwrap();
//! writeln!(file, "[sync]\nenabled = true").unwrap();
//!
//! let resolved = ConfigResolver::new()
//!     .with_path(file.path())
//!     .with_env_lookup(EnvSource::from_pairs([("BMS_SYNC_MODE", "remote")]))
//!     .resolve()
//!     .unwrap();
//!
//! assert!(resolved.config.sync.enabled);
//! assert_eq!(resolved.config.sync.mode, SyncMode::Remote);
//! ```

pub mod decode;
pub mod defaults;
mod duration;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod overlay;
pub mod overrides;
pub mod redaction;
pub mod resolver;
pub mod schema;
pub mod validator;
pub mod warnings;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use decode::{decode_config, decode_overlay, DecodeError};
pub use defaults::{default_config, DEFAULT_REFRESH_BEFORE_EXPIRY, DEFAULT_TOKEN_TTL};
pub use environment::{EnvSource, EnvironmentConfig};
pub use loader::ConfigLoader;
pub use merger::ConfigMerger;
pub use overlay::{
    AuthOverlay, ClientAuthOverlay, ClientOverlay, ClientServerOverlay, ConfigOverlay,
    DatabaseOverlay, DevicePairingOverlay, IntegrationsOverlay, KeyStorageOverlay,
    ListenerOverlay, LoggingOverlay, NamedOverlay, PluginsOverlay, RecoveryOverlay,
    RemoteAuthOverlay, ServerOverlay, SyncOverlay, TelemetryOverlay, ToggleOverlay,
};
pub use overrides::{apply_server_overrides, sanitize};
pub use redaction::{redact, REDACTED_VALUE};
pub use resolver::{
    resolve, resolve_and_validate, resolve_diagnostics, ConfigResolver, Diagnostics, Resolved,
};
pub use schema::{
    AuthConfig, AuthMode, ClientAuthConfig, ClientConfig, ClientServerConfig, Config,
    DatabaseConfig, DatabaseDriver, DevicePairingConfig, Environment, IntegrationsConfig,
    KeyStorageConfig, ListenerConfig, LogFormat, LogLevel, LoggingConfig, NamedConfig,
    PluginsConfig, RecoveryConfig, RemoteAuthConfig, ServerConfig, SyncConfig, SyncMode,
    TelemetryConfig, ToggleConfig, TokenStorage,
};
pub use validator::{ConfigValidator, FieldError, ValidationErrors};
pub use warnings::{collect_warnings, FieldWarning, WarningList};
