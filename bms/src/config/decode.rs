//! Strict TOML decoding.
//!
//! Every key in a document must exist in the schema. Unknown keys are
//! collected at every depth before any value is deserialized, so a single
//! error reports them all.

use serde::de::DeserializeOwned;
use thiserror::Error;
use toml::{Table, Value};

use crate::config::overlay::ConfigOverlay;
use crate::config::schema::Config;

/// Errors raised while decoding a configuration document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed TOML, or a value of the wrong type.
    #[error(transparent)]
    Syntax(#[from] toml::de::Error),

    /// The document contains keys the schema does not declare.
    #[error("invalid config keys: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),

    /// The document is not valid UTF-8.
    #[error("config document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The schema reference table could not be built.
    #[error("failed to build schema reference: {0}")]
    Schema(#[from] toml::ser::Error),
}

/// Decode a complete configuration document.
///
/// Keys absent from the document keep their zero value.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownKeys`] when the document declares keys the
/// schema does not know, or [`DecodeError::Syntax`] when it is not valid
/// TOML or a value has the wrong type.
///
/// # Examples
///
/// ```
/// use bms::config::decode_config;
///
/// let config = decode_config("[server]\nid = \"alpha\"\n").unwrap();
/// assert_eq!(config.server.id, "alpha");
///
/// let err = decode_config("[server]\nunknown = 1\n").unwrap_err();
/// assert_eq!(err.to_string(), "invalid config keys: server.unknown");
/// ```
pub fn decode_config(input: &str) -> Result<Config, DecodeError> {
    decode_strict(input)
}

/// Decode an overlay document.
///
/// Keys present in the document become `Some` in the overlay, even when
/// they hold `false`, `0` or `""`.
///
/// # Errors
///
/// Same as [`decode_config`].
pub fn decode_overlay(input: &str) -> Result<ConfigOverlay, DecodeError> {
    decode_strict(input)
}

fn decode_strict<T: DeserializeOwned>(input: &str) -> Result<T, DecodeError> {
    let document: Table = toml::from_str(input)?;
    let reference = schema_reference()?;

    let mut unknown = Vec::new();
    collect_unknown_keys(&document, &reference, "", &mut unknown);
    if !unknown.is_empty() {
        unknown.sort();
        return Err(DecodeError::UnknownKeys(unknown));
    }

    Ok(Value::Table(document).try_into()?)
}

// Overlays share the shape of Config, so one reference serves both.
fn schema_reference() -> Result<Table, DecodeError> {
    match Value::try_from(Config::default())? {
        Value::Table(table) => Ok(table),
        // Config is a struct; it always serializes to a table.
        _ => Ok(Table::new()),
    }
}

fn collect_unknown_keys(document: &Table, reference: &Table, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in document {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match (reference.get(key), value) {
            (None, _) => out.push(path),
            (Some(Value::Table(expected)), Value::Table(actual)) => {
                collect_unknown_keys(actual, expected, &path, out);
            }
            // Type mismatches are reported by deserialization.
            (Some(_), _) => {}
        }
    }
}
