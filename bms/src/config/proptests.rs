//! Property-based tests for the configuration pipeline.

use super::defaults::default_config;
use super::merger::ConfigMerger;
use super::overlay::{
    AuthOverlay, ConfigOverlay, DatabaseOverlay, KeyStorageOverlay, ServerOverlay, SyncOverlay,
    ToggleOverlay,
};
use super::overrides::sanitize;
use super::redaction::{redact, REDACTED_VALUE};
use super::schema::{AuthMode, Config, DatabaseDriver, SyncMode};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("local".to_string()),
        Just("remote".to_string()),
        Just("hybrid".to_string()),
        "[a-z]{1,8}",
    ]
}

fn server_strategy() -> impl Strategy<Value = Option<ServerOverlay>> {
    prop::option::of(prop::option::of("[a-z0-9-]{0,12}").prop_map(|id| ServerOverlay {
        id,
        environment: None,
    }))
}

fn database_strategy() -> impl Strategy<Value = Option<DatabaseOverlay>> {
    prop::option::of(
        (
            prop::option::of("[a-z:/.]{0,16}"),
            prop::option::of(prop_oneof![Just("sqlite"), Just("postgres"), Just("")]),
        )
            .prop_map(|(dsn, driver)| DatabaseOverlay {
                dsn,
                driver: driver.map(DatabaseDriver::from),
                migrations: None,
            }),
    )
}

fn auth_strategy() -> impl Strategy<Value = Option<AuthOverlay>> {
    prop::option::of(
        (
            prop::option::of(any::<bool>()),
            prop::option::of(mode_strategy()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of("[0-9]{1,3}h"),
        )
            .prop_map(|(enabled, mode, key_auth, allow_unencrypted, token_ttl)| AuthOverlay {
                enabled,
                mode: mode.map(AuthMode::from),
                key_auth: key_auth.map(|enabled| ToggleOverlay {
                    enabled: Some(enabled),
                }),
                key_storage: allow_unencrypted.map(|allow| KeyStorageOverlay {
                    allow_unencrypted: Some(allow),
                    encrypted: None,
                }),
                token_ttl,
                ..Default::default()
            }),
    )
}

fn sync_strategy() -> impl Strategy<Value = Option<SyncOverlay>> {
    prop::option::of(
        (prop::option::of(any::<bool>()), prop::option::of(mode_strategy())).prop_map(
            |(enabled, mode)| SyncOverlay {
                enabled,
                mode: mode.map(SyncMode::from),
            },
        ),
    )
}

fn overlay_strategy() -> impl Strategy<Value = ConfigOverlay> {
    (
        server_strategy(),
        database_strategy(),
        auth_strategy(),
        sync_strategy(),
    )
        .prop_map(|(server, database, auth, sync)| ConfigOverlay {
            server,
            database,
            auth,
            sync,
            ..Default::default()
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    overlay_strategy().prop_map(|overlay| ConfigMerger::apply(default_config(), &overlay))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Merging an empty overlay never changes anything
    #[test]
    fn empty_overlay_is_identity(config in config_strategy()) {
        prop_assert_eq!(ConfigMerger::apply(config.clone(), &ConfigOverlay::default()), config);
    }

    // Applying the same overlay twice equals applying it once
    #[test]
    fn merge_is_idempotent(config in config_strategy(), overlay in overlay_strategy()) {
        let once = ConfigMerger::apply(config, &overlay);
        let twice = ConfigMerger::apply(once.clone(), &overlay);
        prop_assert_eq!(once, twice);
    }

    // Every present leaf wins over the base
    #[test]
    fn present_leaves_win(config in config_strategy(), overlay in overlay_strategy()) {
        let merged = ConfigMerger::apply(config.clone(), &overlay);

        match overlay.server.as_ref().and_then(|s| s.id.as_ref()) {
            Some(id) => prop_assert_eq!(&merged.server.id, id),
            None => prop_assert_eq!(&merged.server.id, &config.server.id),
        }
        match overlay.sync.as_ref().and_then(|s| s.enabled) {
            Some(enabled) => prop_assert_eq!(merged.sync.enabled, enabled),
            None => prop_assert_eq!(merged.sync.enabled, config.sync.enabled),
        }
    }

    // Sanitized overlays only ever carry the allowlisted fields
    #[test]
    fn sanitize_only_keeps_allowlist(overlay in overlay_strategy()) {
        let sanitized = sanitize(&overlay);

        prop_assert!(sanitized.server.is_none());
        prop_assert!(sanitized.database.is_none());
        if let Some(auth) = &sanitized.auth {
            let allowed = AuthOverlay {
                enabled: auth.enabled,
                mode: auth.mode.clone(),
                ..Default::default()
            };
            prop_assert_eq!(auth, &allowed);
            prop_assert!(auth.enabled.is_some() || auth.mode.is_some());
        }
        if let Some(sync) = &sanitized.sync {
            prop_assert!(sync.enabled.is_some() || sync.mode.is_some());
        }
    }

    // Redaction touches secrets and nothing else
    #[test]
    fn redaction_preserves_non_secret_fields(config in config_strategy(), token in "[a-z]{0,8}") {
        let mut config = config;
        config.client.auth.token = token;

        let redacted = redact(&config);
        for (original, masked) in [
            (&config.database.dsn, &redacted.database.dsn),
            (&config.client.auth.token, &redacted.client.auth.token),
        ] {
            if original.is_empty() {
                prop_assert!(masked.is_empty());
            } else {
                prop_assert_eq!(masked, REDACTED_VALUE);
            }
        }

        let mut restored = redacted;
        restored.database.dsn.clone_from(&config.database.dsn);
        restored.client.auth.token.clone_from(&config.client.auth.token);
        prop_assert_eq!(restored, config);
    }

    // Validation is deterministic
    #[test]
    fn validation_is_deterministic(config in config_strategy()) {
        prop_assert_eq!(ConfigValidator::validate(&config), ConfigValidator::validate(&config));
    }
}
