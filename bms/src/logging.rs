//! Logging infrastructure for bms.
//!
//! [`Logger`] writes one structured record per line to stderr, either as a
//! JSON object or as `key=value` text. It is configured from the resolved
//! [`LoggingConfig`], falling back to per-component [`LoggerDefaults`] for
//! unset values. It also implements [`log::Log`], so records emitted by the
//! library through the `log` facade render the same way once installed.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use log::{Level, LevelFilter, Metadata, Record};
use serde_json::Value;

use crate::config::{Config, LogFormat, LogLevel, LoggingConfig};
use crate::error::{Error, Result};

/// Component field name.
pub const FIELD_COMPONENT: &str = "component";
/// Event field name.
pub const FIELD_EVENT: &str = "event";
/// Server identifier field name.
pub const FIELD_SERVER_ID: &str = "server_id";
/// Server environment field name.
pub const FIELD_ENVIRONMENT: &str = "environment";
/// Configuration document path field name.
pub const FIELD_CONFIG_PATH: &str = "config_path";
/// Warning count field name.
pub const FIELD_WARNINGS_COUNT: &str = "warnings_count";
/// Redaction marker field name.
pub const FIELD_REDACTED: &str = "redacted";
/// Error field name.
pub const FIELD_ERROR: &str = "error";

/// The part of bms a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// The command-line client.
    Cli,
    /// Configuration resolution.
    Config,
    /// The server.
    Server,
}

impl Component {
    /// Returns the component name as logged.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Config => "config",
            Self::Server => "server",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields attached to every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultFields {
    /// Emitting component.
    pub component: Option<Component>,
    /// Server environment, omitted when empty.
    pub environment: String,
    /// Server identifier, omitted when empty.
    pub server_id: String,
}

/// Values used when the logging section leaves a setting unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerDefaults {
    /// Fields attached to every record.
    pub fields: DefaultFields,
    /// Fallback output format.
    pub format: LogFormat,
    /// Fallback minimum level.
    pub level: LogLevel,
}

impl LoggerDefaults {
    /// Defaults for `component`, with server identity taken from `config`.
    ///
    /// The server logs JSON; every other component logs text. All default
    /// to `info`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bms::config::{default_config, LogFormat};
    /// use bms::logging::{Component, LoggerDefaults};
    ///
    /// let defaults = LoggerDefaults::for_component(Component::Server, &default_config());
    /// assert_eq!(defaults.format, LogFormat::Json);
    ///
    /// let defaults = LoggerDefaults::for_component(Component::Cli, &default_config());
    /// assert_eq!(defaults.format, LogFormat::Text);
    /// ```
    #[must_use]
    pub fn for_component(component: Component, config: &Config) -> Self {
        let format = match component {
            Component::Server => LogFormat::Json,
            Component::Cli | Component::Config => LogFormat::Text,
        };
        Self {
            fields: DefaultFields {
                component: Some(component),
                environment: config.server.environment.as_str().to_string(),
                server_id: config.server.id.clone(),
            },
            format,
            level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Render {
    Json,
    Text,
}

/// A structured stderr logger.
pub struct Logger {
    render: Render,
    level: LevelFilter,
    fields: Vec<(String, Value)>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("render", &self.render)
            .field("level", &self.level)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Build a logger from the logging section, filling unset values from
    /// `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogSetting`] when the format or level is not
    /// recognised, or when both the section and the defaults leave it unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use bms::config::{default_config, LogFormat, LoggingConfig};
    /// use bms::logging::{Component, Logger, LoggerDefaults};
    ///
    /// let config = default_config();
    /// let defaults = LoggerDefaults::for_component(Component::Server, &config);
    ///
    /// let logger = Logger::from_config(&config.logging, &defaults).unwrap();
    /// assert_eq!(logger.format(), LogFormat::Json);
    ///
    /// let bad = LoggingConfig { format: LogFormat::from("xml"), ..Default::default() };
    /// assert!(Logger::from_config(&bad, &defaults).is_err());
    /// ```
    pub fn from_config(config: &LoggingConfig, defaults: &LoggerDefaults) -> Result<Self> {
        let render = resolve_format(&config.format, &defaults.format)?;
        let level = resolve_level(&config.level, &defaults.level)?;

        let mut fields = Vec::new();
        if let Some(component) = defaults.fields.component {
            fields.push((FIELD_COMPONENT.to_string(), Value::from(component.as_str())));
        }
        if !defaults.fields.server_id.is_empty() {
            fields.push((
                FIELD_SERVER_ID.to_string(),
                Value::from(defaults.fields.server_id.as_str()),
            ));
        }
        if !defaults.fields.environment.is_empty() {
            fields.push((
                FIELD_ENVIRONMENT.to_string(),
                Value::from(defaults.fields.environment.as_str()),
            ));
        }

        Ok(Self {
            render,
            level,
            fields,
            sink: Mutex::new(Box::new(io::stderr())),
        })
    }

    /// A text logger at `info` with no default fields.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            render: Render::Text,
            level: LevelFilter::Info,
            fields: Vec::new(),
            sink: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Send output to `writer` instead of stderr.
    #[must_use]
    pub fn with_writer(self, writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            ..self
        }
    }

    /// The output format in effect.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        match self.render {
            Render::Json => LogFormat::Json,
            Render::Text => LogFormat::Text,
        }
    }

    /// The minimum level in effect.
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Emit a record with structured fields.
    pub fn event(&self, level: Level, message: &str, fields: &[(&str, Value)]) {
        if level > self.level {
            return;
        }

        let line = match self.render {
            Render::Json => self.render_json(level, message, fields),
            Render::Text => self.render_text(level, message, fields),
        };

        if let Ok(mut sink) = self.sink.lock() {
            // Nowhere left to report a failed log write.
            let _ = writeln!(sink, "{line}");
        }
    }

    /// Emit a debug record.
    pub fn debug(&self, message: &str, fields: &[(&str, Value)]) {
        self.event(Level::Debug, message, fields);
    }

    /// Emit an info record.
    pub fn info(&self, message: &str, fields: &[(&str, Value)]) {
        self.event(Level::Info, message, fields);
    }

    /// Emit a warning record.
    pub fn warn(&self, message: &str, fields: &[(&str, Value)]) {
        self.event(Level::Warn, message, fields);
    }

    /// Emit an error record.
    pub fn error(&self, message: &str, fields: &[(&str, Value)]) {
        self.event(Level::Error, message, fields);
    }

    /// Install as the global `log` logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger is already installed.
    pub fn install(self) -> std::result::Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn render_json(&self, level: Level, message: &str, fields: &[(&str, Value)]) -> String {
        let mut line = String::from("{");
        push_json_pair(&mut line, "time", &Value::from(timestamp()));
        push_json_pair(&mut line, "level", &Value::from(level_name(level)));
        push_json_pair(&mut line, "msg", &Value::from(message));
        for (key, value) in &self.fields {
            push_json_pair(&mut line, key, value);
        }
        for (key, value) in fields {
            push_json_pair(&mut line, key, value);
        }
        line.push('}');
        line
    }

    fn render_text(&self, level: Level, message: &str, fields: &[(&str, Value)]) -> String {
        let mut line = String::new();
        push_text_pair(&mut line, "time", &Value::from(timestamp()));
        push_text_pair(&mut line, "level", &Value::from(level_name(level)));
        push_text_pair(&mut line, "msg", &Value::from(message));
        for (key, value) in &self.fields {
            push_text_pair(&mut line, key, value);
        }
        for (key, value) in fields {
            push_text_pair(&mut line, key, value);
        }
        line
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let message = record.args().to_string();
            self.event(
                record.level(),
                &message,
                &[("target", Value::from(record.target()))],
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Build the logger for `component`, falling back to text/info on stderr.
///
/// A fallback is reported through the fallback logger itself.
#[must_use]
pub fn init_logger(config: &Config, component: Component) -> Logger {
    let defaults = LoggerDefaults::for_component(component, config);
    match Logger::from_config(&config.logging, &defaults) {
        Ok(logger) => logger,
        Err(err) => {
            let fallback = Logger::fallback();
            fallback.error(
                "logger init failed",
                &[(FIELD_ERROR, Value::from(err.to_string()))],
            );
            fallback
        }
    }
}

fn resolve_format(format: &LogFormat, fallback: &LogFormat) -> Result<Render> {
    let format = if format.is_unset() { fallback } else { format };
    match format {
        LogFormat::Json => Ok(Render::Json),
        LogFormat::Text => Ok(Render::Text),
        LogFormat::Unset | LogFormat::Other(_) => Err(Error::InvalidLogSetting {
            field: "format",
            value: format.as_str().to_string(),
        }),
    }
}

fn resolve_level(level: &LogLevel, fallback: &LogLevel) -> Result<LevelFilter> {
    let level = if level.is_unset() { fallback } else { level };
    match level {
        LogLevel::Debug => Ok(LevelFilter::Debug),
        LogLevel::Info => Ok(LevelFilter::Info),
        LogLevel::Warn => Ok(LevelFilter::Warn),
        LogLevel::Error => Ok(LevelFilter::Error),
        LogLevel::Unset | LogLevel::Other(_) => Err(Error::InvalidLogSetting {
            field: "level",
            value: level.as_str().to_string(),
        }),
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn push_json_pair(line: &mut String, key: &str, value: &Value) {
    if line.len() > 1 {
        line.push(',');
    }
    line.push_str(&Value::from(key).to_string());
    line.push(':');
    line.push_str(&value.to_string());
}

fn push_text_pair(line: &mut String, key: &str, value: &Value) {
    if !line.is_empty() {
        line.push(' ');
    }
    let _ = write!(line, "{key}={}", text_value(value));
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) if needs_quoting(s) => Value::from(s.as_str()).to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '"' || c == '=' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn logger(format: LogFormat, level: LogLevel) -> (Logger, SharedBuffer) {
        let mut config = default_config();
        config.server.id = "bms-1".to_string();
        let defaults = LoggerDefaults::for_component(Component::Server, &config);
        let logging = LoggingConfig { format, level };
        let buffer = SharedBuffer::default();
        let logger = Logger::from_config(&logging, &defaults)
            .unwrap()
            .with_writer(buffer.clone());
        (logger, buffer)
    }

    #[test]
    fn test_defaults_fill_unset_values() {
        let (logger, _) = logger(LogFormat::Unset, LogLevel::Unset);
        assert_eq!(logger.format(), LogFormat::Json);
        assert_eq!(logger.level(), LevelFilter::Info);
    }

    #[test]
    fn test_config_overrides_defaults() {
        let (logger, _) = logger(LogFormat::Text, LogLevel::Debug);
        assert_eq!(logger.format(), LogFormat::Text);
        assert_eq!(logger.level(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let defaults = LoggerDefaults::for_component(Component::Cli, &default_config());

        let bad_format = LoggingConfig {
            format: LogFormat::from("xml"),
            level: LogLevel::Unset,
        };
        let err = Logger::from_config(&bad_format, &defaults).unwrap_err();
        assert!(matches!(err, Error::InvalidLogSetting { field: "format", .. }));

        let bad_level = LoggingConfig {
            format: LogFormat::Unset,
            level: LogLevel::from("loud"),
        };
        let err = Logger::from_config(&bad_level, &defaults).unwrap_err();
        assert!(matches!(err, Error::InvalidLogSetting { field: "level", .. }));
    }

    #[test]
    fn test_unset_everywhere_is_an_error() {
        let defaults = LoggerDefaults {
            fields: DefaultFields::default(),
            format: LogFormat::Unset,
            level: LogLevel::Info,
        };
        assert!(Logger::from_config(&LoggingConfig::default(), &defaults).is_err());
    }

    #[test]
    fn test_json_record_shape() {
        let (logger, buffer) = logger(LogFormat::Json, LogLevel::Info);
        logger.info("hello", &[("count", Value::from(2))]);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["msg"], "hello");
        assert_eq!(record[FIELD_COMPONENT], "server");
        assert_eq!(record[FIELD_SERVER_ID], "bms-1");
        assert!(record.get(FIELD_ENVIRONMENT).is_none());
        assert_eq!(record["count"], 2);
        assert!(record["time"].as_str().unwrap().ends_with('Z'));
        assert!(lines[0].starts_with("{\"time\":"));
    }

    #[test]
    fn test_text_record_shape() {
        let (logger, buffer) = logger(LogFormat::Text, LogLevel::Info);
        logger.warn(
            "config warnings",
            &[
                ("path", Value::from("/tmp/bms config.toml")),
                ("ok", Value::from(true)),
            ],
        );

        let line = &buffer.lines()[0];
        assert!(line.starts_with("time="));
        assert!(line.contains(" level=WARN "));
        assert!(line.contains(" msg=\"config warnings\" "));
        assert!(line.contains(" component=server "));
        assert!(line.contains(" path=\"/tmp/bms config.toml\""));
        assert!(line.ends_with(" ok=true"));
    }

    #[test]
    fn test_level_filtering() {
        let (logger, buffer) = logger(LogFormat::Json, LogLevel::Warn);
        logger.debug("hidden", &[]);
        logger.info("hidden", &[]);
        logger.warn("shown", &[]);
        logger.error("shown", &[]);
        assert_eq!(buffer.lines().len(), 2);
    }

    #[test]
    fn test_log_facade_records_render() {
        let (logger, buffer) = logger(LogFormat::Json, LogLevel::Debug);
        log::Log::log(
            &logger,
            &Record::builder()
                .level(Level::Debug)
                .target("bms::config")
                .args(format_args!("resolved config path {}", "/x"))
                .build(),
        );

        let record: Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
        assert_eq!(record["msg"], "resolved config path /x");
        assert_eq!(record["target"], "bms::config");
    }

    #[test]
    fn test_init_logger_falls_back() {
        let mut config = default_config();
        config.logging.format = LogFormat::from("xml");
        let logger = init_logger(&config, Component::Server);
        assert_eq!(logger.format(), LogFormat::Text);
        assert_eq!(logger.level(), LevelFilter::Info);
    }

    #[test]
    fn test_text_value_quoting() {
        assert_eq!(text_value(&Value::from("plain")), "plain");
        assert_eq!(text_value(&Value::from("")), "\"\"");
        assert_eq!(text_value(&Value::from("a b")), "\"a b\"");
        assert_eq!(text_value(&serde_json::json!({"a": 1})), "{\"a\":1}");
    }
}
