use crate::level::Level;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute keys written by the builder.
pub mod keys {
    pub const TIME: &str = "time";
    pub const LEVEL: &str = "level";
    pub const MESSAGE: &str = "msg";
    pub const CONTEXT: &str = "app_ctx";
    pub const SEGMENT: &str = "segment";
    pub const ERROR: &str = "error_msg";
    pub const ALERT: &str = "alert";
    pub const SOURCE: &str = "source";
    pub const CALLSTACK: &str = "callstack";
}

/// Value carried by an [`Attribute`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    List(Vec<String>),
    Map(BTreeMap<String, serde_json::Value>),
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Value {
    fn from(value: BTreeMap<String, serde_json::Value>) -> Self {
        Value::Map(value)
    }
}

/// A key bound to a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Attribute { key: key.into(), value: value.into() }
    }
}

/// One finished log entry as handed to a [`Sink`](crate::sink::Sink).
///
/// Serializes to a flat JSON object: `time`, `level`, `msg`, then every
/// attribute in the order it was added. Repeated keys are written as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub attributes: Vec<Attribute>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        LogRecord {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            attributes,
        }
    }

    /// Last attribute stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.iter().rev().find(|a| a.key == key).map(|a| &a.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.iter().any(|a| a.key == key)
    }

    /// Render as a single JSON line without the trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.attributes.len()))?;
        map.serialize_entry(
            keys::TIME,
            &self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        map.serialize_entry(keys::LEVEL, &self.level)?;
        map.serialize_entry(keys::MESSAGE, &self.message)?;
        for attr in &self.attributes {
            map.serialize_entry(&attr.key, &attr.value)?;
        }
        map.end()
    }
}
