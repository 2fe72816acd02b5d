//! Non-fatal configuration warnings.

use std::fmt;

use serde::Serialize;

use crate::config::schema::Config;

/// A setting that is valid but deserves operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    /// Dotted path of the field.
    pub path: String,
    /// Why it deserves attention.
    pub message: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.path.is_empty(), self.message.is_empty()) {
            (true, _) => f.write_str(&self.message),
            (false, true) => f.write_str(&self.path),
            (false, false) => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// Ordered collection of warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WarningList(Vec<FieldWarning>);

impl WarningList {
    /// Returns true when there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the warnings.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldWarning> {
        self.0.iter()
    }

    fn push(&mut self, path: &str, message: &str) {
        self.0.push(FieldWarning {
            path: path.to_string(),
            message: message.to_string(),
        });
    }
}

impl<'a> IntoIterator for &'a WarningList {
    type Item = &'a FieldWarning;
    type IntoIter = std::slice::Iter<'a, FieldWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for WarningList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, warning) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{warning}")?;
        }
        Ok(())
    }
}

/// Collect warnings for a resolved configuration.
///
/// Warnings never fail resolution.
///
/// # Examples
///
/// ```
/// use bms::config::{collect_warnings, default_config};
///
/// let mut config = default_config();
/// assert!(collect_warnings(&config).is_empty());
///
/// config.auth.key_storage.allow_unencrypted = true;
/// assert_eq!(collect_warnings(&config).len(), 1);
/// ```
#[must_use]
pub fn collect_warnings(config: &Config) -> WarningList {
    let mut warnings = WarningList::default();

    if config.auth.key_storage.allow_unencrypted {
        warnings.push(
            "auth.key_storage.allow_unencrypted",
            "allows unencrypted key storage; review before enabling",
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;
    use crate::config::schema::DatabaseDriver;
    use crate::config::validator::ConfigValidator;

    #[test]
    fn test_no_warnings_by_default() {
        let warnings = collect_warnings(&default_config());
        assert!(warnings.is_empty());
        assert_eq!(warnings.to_string(), "");
    }

    #[test]
    fn test_allow_unencrypted_warns_without_validation_error() {
        let mut config = default_config();
        config.database.driver = DatabaseDriver::Sqlite;
        config.database.dsn = "file:bms.db".to_string();
        config.auth.key_storage.allow_unencrypted = true;

        let warnings = collect_warnings(&config);
        assert_eq!(warnings.len(), 1);
        let warning = warnings.iter().next().unwrap();
        assert_eq!(warning.path, "auth.key_storage.allow_unencrypted");
        assert_eq!(
            warnings.to_string(),
            "auth.key_storage.allow_unencrypted: allows unencrypted key storage; review before enabling"
        );

        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_warning_list_serializes_as_objects() {
        let mut config = default_config();
        config.auth.key_storage.allow_unencrypted = true;

        let json = serde_json::to_value(collect_warnings(&config)).unwrap();
        assert_eq!(json[0]["path"], "auth.key_storage.allow_unencrypted");
        assert!(json[0]["message"].as_str().unwrap().contains("unencrypted"));
    }
}
