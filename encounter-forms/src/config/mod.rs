//! Element configuration
//!
//! A form element is configured by a flat key/value bag, the way attributes
//! on a form tag configure it. The bag is consumed once, at construction, and
//! not kept afterwards.

mod error;

pub use error::ConfigError;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Recognised parameter keys
pub mod keys {
    pub const DATE: &str = "date";
    pub const SHOW_TIME: &str = "showTime";
    pub const DEFAULT_DATE: &str = "defaultDate";
    pub const PROVIDER: &str = "provider";
    pub const PERSONS: &str = "persons";
    pub const ROLE: &str = "role";
    pub const DEFAULT: &str = "default";
    pub const LOCATION: &str = "location";
    pub const ORDER: &str = "order";
}

/// A single configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        ParamValue::Timestamp(value)
    }
}

/// Immutable parameter bag handed to an element constructor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementParameters {
    values: BTreeMap<String, ParamValue>,
}

impl ElementParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True only for `true` or the exact text `"true"`
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(ParamValue::Bool(b)) => *b,
            Some(ParamValue::Text(s)) => s == "true",
            _ => false,
        }
    }

    /// Raw text value, if the key holds text
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParamValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text value with surrounding whitespace removed, `None` when blank
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.text(key).map(str::trim).filter(|s| !s.is_empty())
    }

    /// Comma-separated list, entries trimmed, empty entries dropped
    ///
    /// `None` when the key is absent; `Some(vec![])` when present but empty.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.text(key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Timestamp value; text is parsed, anything else is an error
    pub fn timestamp(&self, key: &str) -> Result<Option<NaiveDateTime>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Timestamp(ts)) => Ok(Some(*ts)),
            Some(ParamValue::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(ParamValue::Text(s)) => parse_timestamp(s).map(Some).ok_or_else(|| {
                ConfigError::InvalidParameter {
                    key: key.to_string(),
                    expected: "a timestamp (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])",
                }
            }),
            Some(ParamValue::Bool(_)) => Err(ConfigError::InvalidParameter {
                key: key.to_string(),
                expected: "a timestamp",
            }),
        }
    }

    /// Build the bag from a TOML table
    ///
    /// Integers and floats become text (identifiers are often numeric), arrays
    /// of scalars are joined with commas, datetimes become timestamps.
    pub fn from_toml(table: &toml::Table) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();
        for (key, value) in table {
            values.insert(key.clone(), param_from_toml(key, value)?);
        }
        Ok(ElementParameters { values })
    }
}

fn param_from_toml(key: &str, value: &toml::Value) -> Result<ParamValue, ConfigError> {
    match value {
        toml::Value::Boolean(b) => Ok(ParamValue::Bool(*b)),
        toml::Value::String(s) => Ok(ParamValue::Text(s.clone())),
        toml::Value::Integer(i) => Ok(ParamValue::Text(i.to_string())),
        toml::Value::Float(f) => Ok(ParamValue::Text(f.to_string())),
        toml::Value::Datetime(dt) => parse_timestamp(&dt.to_string())
            .map(ParamValue::Timestamp)
            .ok_or_else(|| ConfigError::InvalidParameter {
                key: key.to_string(),
                expected: "a local date or date-time",
            }),
        toml::Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    toml::Value::String(s) => parts.push(s.clone()),
                    toml::Value::Integer(i) => parts.push(i.to_string()),
                    _ => {
                        return Err(ConfigError::InvalidParameter {
                            key: key.to_string(),
                            expected: "an array of strings or integers",
                        });
                    }
                }
            }
            Ok(ParamValue::Text(parts.join(",")))
        }
        toml::Value::Table(_) => Err(ConfigError::InvalidParameter {
            key: key.to_string(),
            expected: "a scalar value",
        }),
    }
}

/// Parse the timestamp shapes accepted in configuration
///
/// Offsets are dropped and the wall-clock time kept, since encounter times
/// are local.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// A form definition file: element parameters plus optional message overrides
///
/// ```toml
/// [element]
/// date = true
/// showTime = "true"
/// provider = true
/// role = "Clinician"
///
/// [messages]
/// "general.choose" = "Pick one"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub element: toml::Table,
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl FormDefinition {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn parameters(&self) -> Result<ElementParameters, ConfigError> {
        ElementParameters::from_toml(&self.element)
    }
}
