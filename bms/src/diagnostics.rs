//! Startup diagnostics for a resolved configuration.
//!
//! Only redacted configurations are ever logged.

use std::path::Path;

use serde_json::Value;

use crate::config::{redact, Config, LogFormat, WarningList};
use crate::logging::{
    Component, Logger, FIELD_COMPONENT, FIELD_CONFIG_PATH, FIELD_EVENT, FIELD_REDACTED,
    FIELD_WARNINGS_COUNT,
};

/// Event name for the resolved configuration summary.
pub const EVENT_CONFIG_LOADED: &str = "config_loaded";
/// Event name for configuration warnings.
pub const EVENT_CONFIG_WARNINGS: &str = "config_warnings";

/// Log the redacted configuration, its path and any warnings.
///
/// Emits `config loaded` at info level and, when there are warnings,
/// `config warnings` at warn level. Warnings are a list of `{path, message}`
/// objects in JSON output and one joined string in text output.
///
/// Both records carry `component=config` after the logger's own `component`
/// field, so a JSON line holds the key twice and the last one is `config`.
///
/// # Examples
///
/// ```
/// use bms::config::{default_config, collect_warnings};
/// use bms::diagnostics::log_config_diagnostics;
/// use bms::logging::Logger;
/// use std::path::Path;
///
/// let config = default_config();
/// let warnings = collect_warnings(&config);
/// log_config_diagnostics(&Logger::fallback(), &config, Path::new("config.toml"), &warnings);
/// ```
pub fn log_config_diagnostics(
    logger: &Logger,
    config: &Config,
    path: &Path,
    warnings: &WarningList,
) {
    let redacted = serde_json::to_value(redact(config)).unwrap_or(Value::Null);

    logger.info(
        "config loaded",
        &[
            (FIELD_COMPONENT, Value::from(Component::Config.as_str())),
            (FIELD_EVENT, Value::from(EVENT_CONFIG_LOADED)),
            (FIELD_CONFIG_PATH, Value::from(path.display().to_string())),
            (FIELD_REDACTED, Value::from(true)),
            (FIELD_WARNINGS_COUNT, Value::from(warnings.len())),
            ("config", redacted),
        ],
    );

    if warnings.is_empty() {
        return;
    }

    logger.warn(
        "config warnings",
        &[
            (FIELD_COMPONENT, Value::from(Component::Config.as_str())),
            (FIELD_EVENT, Value::from(EVENT_CONFIG_WARNINGS)),
            (FIELD_WARNINGS_COUNT, Value::from(warnings.len())),
            ("warnings", format_warnings(logger.format(), warnings)),
        ],
    );
}

fn format_warnings(format: LogFormat, warnings: &WarningList) -> Value {
    match format {
        LogFormat::Json => serde_json::to_value(warnings).unwrap_or(Value::Null),
        _ => Value::from(warnings.to_string()),
    }
}
