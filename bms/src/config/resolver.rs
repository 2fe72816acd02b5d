//! Configuration resolution pipeline.
//!
//! Sources are applied in a fixed order, each one overriding the last:
//!
//! 1. Built-in defaults
//! 2. The configuration document
//! 3. Environment variables (`BMS_*`)
//! 4. The CLI overlay
//! 5. Sanitized server overrides
//!
//! A path, I/O or decode failure aborts resolution; there is no fallback to
//! defaults on a broken document.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::default_config;
use crate::config::environment::{EnvSource, EnvironmentConfig};
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::overlay::ConfigOverlay;
use crate::config::overrides::apply_server_overrides;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::config::warnings::{collect_warnings, WarningList};
use crate::error::{Error, Result};

/// A resolved configuration and the document it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The effective configuration.
    pub config: Config,
    /// The document path used for loading.
    pub path: PathBuf,
}

/// Everything needed to report on a resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// The effective configuration. Not redacted.
    pub config: Config,
    /// The document path used for loading.
    pub path: PathBuf,
    /// Non-fatal findings.
    pub warnings: WarningList,
}

/// Builder for a resolution run.
///
/// # Examples
///
/// ```
/// use bms::config::{ConfigOverlay, ConfigResolver, ServerOverlay};
/// use std::io::Write;
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// writeln!(file, "[server]\nid = \"file-id\"").unwrap();
///
/// let cli = ConfigOverlay {
///     server: Some(ServerOverlay { id: Some("cli-id".into()), ..Default::default() }),
///     ..Default::default()
/// };
///
/// let resolved = ConfigResolver::new()
///     .with_path(file.path())
///     .with_cli_overlay(cli)
///     .skip_env()
///     .resolve()
///     .unwrap();
///
/// assert_eq!(resolved.config.server.id, "cli-id");
/// assert_eq!(resolved.config.auth.token_ttl, "168h");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    path: Option<PathBuf>,
    cli_overlay: ConfigOverlay,
    server_overrides: ConfigOverlay,
    env: EnvSource,
}

impl ConfigResolver {
    /// Start a resolution reading the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document from `path` instead of `BMS_CONFIG` or the default.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Overlay applied after environment variables.
    #[must_use]
    pub fn with_cli_overlay(mut self, overlay: ConfigOverlay) -> Self {
        self.cli_overlay = overlay;
        self
    }

    /// Server-required overrides, sanitized and applied last.
    #[must_use]
    pub fn with_server_overrides(mut self, overlay: ConfigOverlay) -> Self {
        self.server_overrides = overlay;
        self
    }

    /// Read `BMS_*` variables from `env` instead of the process environment.
    #[must_use]
    pub fn with_env_lookup(mut self, env: EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Ignore environment variables entirely, including `BMS_CONFIG`.
    #[must_use]
    pub fn skip_env(self) -> Self {
        self.with_env_lookup(EnvSource::None)
    }

    /// Resolve the configuration without validating it.
    ///
    /// # Errors
    ///
    /// Returns the first path, I/O or decode error encountered.
    pub fn resolve(&self) -> Result<Resolved> {
        let path = ConfigLoader::resolve_path_with(self.path.as_deref(), &self.env)?;
        log::debug!("resolved config path {}", path.display());

        let file_overlay = ConfigLoader::load_overlay(&path)?;

        let config = default_config();
        let config = ConfigMerger::apply(config, &file_overlay);
        let config = EnvironmentConfig::apply(config, &self.env);
        let config = ConfigMerger::apply(config, &self.cli_overlay);
        let config = apply_server_overrides(config, &self.server_overrides);

        Ok(Resolved { config, path })
    }

    /// Resolve, then validate.
    ///
    /// # Errors
    ///
    /// Returns resolution errors as [`resolve`](Self::resolve) does. A
    /// validation failure returns [`Error::Validation`] carrying the resolved
    /// configuration.
    pub fn resolve_and_validate(&self) -> Result<Resolved> {
        let diagnostics = self.resolve_diagnostics()?;
        Ok(Resolved {
            config: diagnostics.config,
            path: diagnostics.path,
        })
    }

    /// Resolve, collect warnings, then validate.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_and_validate`](Self::resolve_and_validate); the
    /// validation error carries the full diagnostics.
    pub fn resolve_diagnostics(&self) -> Result<Diagnostics> {
        let Resolved { config, path } = self.resolve()?;
        let warnings = collect_warnings(&config);

        match ConfigValidator::validate(&config) {
            Ok(()) => Ok(Diagnostics {
                config,
                path,
                warnings,
            }),
            Err(errors) => Err(Error::Validation {
                errors,
                diagnostics: Box::new(Diagnostics {
                    config,
                    path,
                    warnings,
                }),
            }),
        }
    }

    fn from_args(
        override_path: Option<&Path>,
        cli_overlay: &ConfigOverlay,
        server_overrides: &ConfigOverlay,
    ) -> Self {
        Self {
            path: override_path.map(Path::to_path_buf),
            cli_overlay: cli_overlay.clone(),
            server_overrides: server_overrides.clone(),
            env: EnvSource::Process,
        }
    }
}

/// Resolve the effective configuration from every source.
///
/// # Errors
///
/// See [`ConfigResolver::resolve`].
pub fn resolve(
    override_path: Option<&Path>,
    cli_overlay: &ConfigOverlay,
    server_overrides: &ConfigOverlay,
) -> Result<Resolved> {
    ConfigResolver::from_args(override_path, cli_overlay, server_overrides).resolve()
}

/// Resolve and validate the effective configuration.
///
/// # Errors
///
/// See [`ConfigResolver::resolve_and_validate`].
pub fn resolve_and_validate(
    override_path: Option<&Path>,
    cli_overlay: &ConfigOverlay,
    server_overrides: &ConfigOverlay,
) -> Result<Resolved> {
    ConfigResolver::from_args(override_path, cli_overlay, server_overrides).resolve_and_validate()
}

/// Resolve, collect warnings and validate the effective configuration.
///
/// # Errors
///
/// See [`ConfigResolver::resolve_diagnostics`].
pub fn resolve_diagnostics(
    override_path: Option<&Path>,
    cli_overlay: &ConfigOverlay,
    server_overrides: &ConfigOverlay,
) -> Result<Diagnostics> {
    ConfigResolver::from_args(override_path, cli_overlay, server_overrides).resolve_diagnostics()
}
