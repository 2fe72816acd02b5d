//! Server-required overrides.
//!
//! The server may enforce a small allowlist of runtime switches on its
//! clients: `auth.enabled`, `auth.mode`, `sync.enabled` and `sync.mode`.
//! Everything else in a server-supplied overlay is dropped.

use crate::config::merger::ConfigMerger;
use crate::config::overlay::{AuthOverlay, ConfigOverlay, SyncOverlay};
use crate::config::schema::Config;

/// Reduce an overlay to the allowlisted fields.
///
/// A section appears in the result only when at least one of its
/// allowlisted fields was present in the input.
///
/// # Examples
///
/// ```
/// use bms::config::{sanitize, ConfigOverlay, ServerOverlay, SyncOverlay};
///
/// let overlay = ConfigOverlay {
///     server: Some(ServerOverlay { id: Some("forced".into()), ..Default::default() }),
///     sync: Some(SyncOverlay { enabled: Some(true), ..Default::default() }),
///     ..Default::default()
/// };
///
/// let sanitized = sanitize(&overlay);
/// assert!(sanitized.server.is_none());
/// assert_eq!(sanitized.sync.unwrap().enabled, Some(true));
/// ```
#[must_use]
pub fn sanitize(overlay: &ConfigOverlay) -> ConfigOverlay {
    let auth = overlay
        .auth
        .as_ref()
        .map(|auth| AuthOverlay {
            enabled: auth.enabled,
            mode: auth.mode.clone(),
            ..Default::default()
        })
        .filter(|auth| auth.enabled.is_some() || auth.mode.is_some());

    let sync = overlay
        .sync
        .as_ref()
        .map(|sync| SyncOverlay {
            enabled: sync.enabled,
            mode: sync.mode.clone(),
        })
        .filter(|sync| sync.enabled.is_some() || sync.mode.is_some());

    let sanitized = ConfigOverlay {
        auth,
        sync,
        ..Default::default()
    };

    if sanitized != *overlay {
        log::debug!("server overrides reduced to auth.enabled, auth.mode, sync.enabled, sync.mode");
    }

    sanitized
}

/// Apply the allowlisted part of a server overlay to a configuration.
#[must_use]
pub fn apply_server_overrides(base: Config, overlay: &ConfigOverlay) -> Config {
    ConfigMerger::apply(base, &sanitize(overlay))
}
