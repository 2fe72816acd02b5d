//! Configuration file discovery and loading.
//!
//! Path resolution never touches the filesystem. Loading stats the path
//! once, then reads it once, so a missing file, a directory and any other
//! I/O failure are reported as distinct errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::decode::{decode_config, decode_overlay, DecodeError};
use crate::config::environment::{EnvSource, ENV_CONFIG_PATH};
use crate::config::overlay::ConfigOverlay;
use crate::config::schema::Config;
use crate::error::{Error, PathError, Result};

/// Directory under the platform config directory holding the document.
pub const CONFIG_DIR_NAME: &str = "bms";

/// Configuration document file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolves configuration paths and loads documents.
///
/// # Examples
///
/// ```no_run
/// use bms::config::ConfigLoader;
///
/// let (overlay, path) = ConfigLoader::load_overlay_from_default(None).unwrap();
/// println!("loaded {} ({} sections)", path.display(), !overlay.is_empty());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Choose the configuration path from the process environment.
    ///
    /// Precedence: `explicit` when non-empty, then `BMS_CONFIG` when
    /// non-empty, then [`default_path`](Self::default_path). A leading `~`
    /// in `explicit` or `BMS_CONFIG` is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory or the platform config
    /// directory is needed but unavailable.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        Self::resolve_path_with(explicit, &EnvSource::Process)
    }

    /// Choose the configuration path, reading `BMS_CONFIG` from `env`.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_path`](Self::resolve_path).
    pub fn resolve_path_with(explicit: Option<&Path>, env: &EnvSource) -> Result<PathBuf> {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Self::expand_tilde(path);
        }

        if let Some(path) = env.get(ENV_CONFIG_PATH) {
            return Self::expand_tilde(Path::new(&path));
        }

        Self::default_path()
    }

    /// The platform default: `<config dir>/bms/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigDirUnavailable`] if the platform does not
    /// report a user configuration directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(Error::ConfigDirUnavailable)?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Expand a leading `~`, `~/` or `~\` to the home directory.
    ///
    /// Other paths, including `~user/...` and non-UTF-8 paths, are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirUnavailable`] if expansion is needed and the
    /// home directory cannot be determined.
    ///
    /// # Examples
    ///
    /// ```
    /// use bms::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let expanded = ConfigLoader::expand_tilde(Path::new("/etc/bms.toml")).unwrap();
    /// assert_eq!(expanded, Path::new("/etc/bms.toml"));
    /// ```
    pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
        let Some(path_str) = path.to_str() else {
            return Ok(path.to_path_buf());
        };

        let rest = if path_str == "~" {
            ""
        } else if let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| path_str.strip_prefix("~\\"))
        {
            rest
        } else {
            return Ok(path.to_path_buf());
        };

        let home = home::home_dir().ok_or_else(|| Error::HomeDirUnavailable {
            path: path.to_path_buf(),
        })?;

        if rest.is_empty() {
            Ok(home)
        } else {
            Ok(home.join(rest))
        }
    }

    /// Load a complete configuration document.
    ///
    /// Keys absent from the document keep their zero value; defaults are
    /// not applied.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotFound`] or [`PathError::IsDirectory`] for an
    /// unusable path, [`Error::Io`] for any other filesystem failure, and
    /// [`Error::Decode`] for a document that is not UTF-8 or not valid.
    pub fn load_config(path: &Path) -> Result<Config> {
        let contents = Self::read_document(path)?;
        decode_config(&contents).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an overlay document.
    ///
    /// # Errors
    ///
    /// Same as [`load_config`](Self::load_config).
    pub fn load_overlay(path: &Path) -> Result<ConfigOverlay> {
        let contents = Self::read_document(path)?;
        decode_overlay(&contents).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the path, then load a complete configuration from it.
    ///
    /// # Errors
    ///
    /// Returns any path resolution or load error.
    pub fn load_config_from_default(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
        let path = Self::resolve_path(explicit)?;
        let config = Self::load_config(&path)?;
        Ok((config, path))
    }

    /// Resolve the path, then load an overlay from it.
    ///
    /// # Errors
    ///
    /// Returns any path resolution or load error.
    pub fn load_overlay_from_default(
        explicit: Option<&Path>,
    ) -> Result<(ConfigOverlay, PathBuf)> {
        let path = Self::resolve_path(explicit)?;
        let overlay = Self::load_overlay(&path)?;
        Ok((overlay, path))
    }

    fn read_document(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::from(PathError::NotFound {
                path: path.to_path_buf(),
            }),
            _ => Error::Io(e),
        })?;

        if metadata.is_dir() {
            return Err(PathError::IsDirectory {
                path: path.to_path_buf(),
            }
            .into());
        }

        log::debug!("reading config document {}", path.display());
        String::from_utf8(fs::read(path)?).map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            source: DecodeError::Encoding(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SyncMode;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = ConfigLoader::load_config(&path).unwrap_err();
        assert!(err.is_not_found());

        let err = ConfigLoader::load_overlay(&path).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = ConfigLoader::load_config(temp_dir.path()).unwrap_err();
        assert!(err.is_directory());

        let err = ConfigLoader::load_overlay(temp_dir.path()).unwrap_err();
        assert!(err.is_directory());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "[server\n").unwrap();

        let err = ConfigLoader::load_overlay(&path).unwrap_err();
        match err {
            Error::Decode { path: failed, source } => {
                assert_eq!(failed, path);
                assert!(matches!(source, DecodeError::Syntax(_)));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_unknown_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[server]\nunknown = true\n").unwrap();

        let err = ConfigLoader::load_config(&path).unwrap_err();
        assert!(err.to_string().contains("server.unknown"));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[sync]\nenabled = true\nmode = \"remote\"\n").unwrap();

        let config = ConfigLoader::load_config(&path).unwrap();
        assert!(config.sync.enabled);
        assert_eq!(config.sync.mode, SyncMode::Remote);
        // No defaults on a direct load.
        assert!(config.auth.token_ttl.is_empty());

        let overlay = ConfigLoader::load_overlay(&path).unwrap();
        assert!(overlay.sync.is_some());
        assert!(overlay.auth.is_none());
    }

    #[test]
    fn test_resolve_path_explicit_wins() {
        let env = EnvSource::from_pairs([(ENV_CONFIG_PATH, "/from/env.toml")]);
        let path = ConfigLoader::resolve_path_with(Some(Path::new("/explicit.toml")), &env).unwrap();
        assert_eq!(path, PathBuf::from("/explicit.toml"));
    }

    #[test]
    fn test_resolve_path_empty_explicit_falls_through() {
        let env = EnvSource::from_pairs([(ENV_CONFIG_PATH, "/from/env.toml")]);
        let path = ConfigLoader::resolve_path_with(Some(Path::new("")), &env).unwrap();
        assert_eq!(path, PathBuf::from("/from/env.toml"));
    }

    #[test]
    fn test_resolve_path_env_used_when_no_explicit() {
        let env = EnvSource::from_pairs([(ENV_CONFIG_PATH, "/from/env.toml")]);
        let path = ConfigLoader::resolve_path_with(None, &env).unwrap();
        assert_eq!(path, PathBuf::from("/from/env.toml"));
    }

    #[test]
    fn test_resolve_path_default() {
        let env = EnvSource::from_pairs([(ENV_CONFIG_PATH, "")]);
        match ConfigLoader::resolve_path_with(None, &env) {
            Ok(path) => {
                assert!(path.ends_with("bms/config.toml"));
                assert_eq!(path, ConfigLoader::default_path().unwrap());
            }
            Err(err) => assert!(matches!(err, Error::ConfigDirUnavailable)),
        }
    }

    #[test]
    fn test_resolve_path_does_not_touch_filesystem() {
        let path = ConfigLoader::resolve_path_with(
            Some(Path::new("/definitely/not/here.toml")),
            &EnvSource::None,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/definitely/not/here.toml"));
    }

    #[test]
    fn test_expand_tilde_forms() {
        let Some(home) = home::home_dir() else {
            return;
        };

        assert_eq!(ConfigLoader::expand_tilde(Path::new("~")).unwrap(), home);
        assert_eq!(
            ConfigLoader::expand_tilde(Path::new("~/bms/config.toml")).unwrap(),
            home.join("bms/config.toml")
        );
        assert_eq!(
            ConfigLoader::expand_tilde(Path::new("~\\bms.toml")).unwrap(),
            home.join("bms.toml")
        );
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        for raw in ["/etc/bms.toml", "relative/bms.toml", "~other/bms.toml", "a/~/b"] {
            assert_eq!(ConfigLoader::expand_tilde(Path::new(raw)).unwrap(), PathBuf::from(raw));
        }
    }

    #[test]
    fn test_env_path_is_expanded() {
        let Some(home) = home::home_dir() else {
            return;
        };
        let env = EnvSource::from_pairs([(ENV_CONFIG_PATH, "~/custom.toml")]);
        let path = ConfigLoader::resolve_path_with(None, &env).unwrap();
        assert_eq!(path, home.join("custom.toml"));
    }

    #[test]
    fn test_load_from_explicit_path_returns_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[server]\nid = \"alpha\"\n").unwrap();

        let (config, loaded) = ConfigLoader::load_config_from_default(Some(&path)).unwrap();
        assert_eq!(config.server.id, "alpha");
        assert_eq!(loaded, path);

        let (overlay, loaded) = ConfigLoader::load_overlay_from_default(Some(&path)).unwrap();
        assert_eq!(overlay.server.unwrap().id.as_deref(), Some("alpha"));
        assert!(overlay.database.is_none());
        assert_eq!(loaded, path);
    }

    #[test]
    fn test_non_utf8_document_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, b"[server]\nid = \"\xff\xfe\"\n").unwrap();

        for err in [
            ConfigLoader::load_config(&path).unwrap_err(),
            ConfigLoader::load_overlay(&path).unwrap_err(),
        ] {
            match err {
                Error::Decode {
                    path: ref failed,
                    source: DecodeError::Encoding(_),
                } => assert_eq!(failed, &path),
                other => panic!("expected encoding error, got {other:?}"),
            }
        }
    }
}
