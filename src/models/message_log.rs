//! The stored message log, resolved once into an explicit shape.
//!
//! Historical rows hold the log as a JSON array of objects, a JSON array of
//! strings, a single JSON object, a JSON-encoded string (possibly wrapping any
//! of the former) or plain text that is not JSON at all. The text is parsed
//! once; an encoded string keeps its decoded text for the preview path.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum MessageLog {
    /// NULL column, JSON `null` or nothing usable.
    Empty,
    /// A JSON array, oldest entry first.
    Entries(Vec<LogEntry>),
    /// A single JSON object that is not a list.
    SingleObject(Map<String, Value>),
    /// Text that does not parse as JSON. It is literal message content.
    RawText(String),
    /// A top-level JSON string, holding the decoded text. Not a message list.
    Encoded(String),
    /// A JSON number or boolean at the top level.
    Scalar(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Object(Map<String, Value>),
    Text(String),
    Other(Value),
}

impl MessageLog {
    /// Resolves the text read from storage with a single JSON parse.
    pub fn from_text(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::RawText(raw.to_string()),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::Encoded(text),
            Value::Array(items) => Self::Entries(items.into_iter().map(LogEntry::from).collect()),
            Value::Object(map) => Self::SingleObject(map),
            scalar => Self::Scalar(scalar),
        }
    }

    /// True when the raw column held nothing worth inspecting.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Entries(entries) => entries.is_empty(),
            Self::RawText(text) | Self::Encoded(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl From<Option<&str>> for MessageLog {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::from_text).unwrap_or(Self::Empty)
    }
}

impl From<Value> for LogEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(map),
            Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }
}

/// Renders a field value as display text. Strings are taken verbatim, `null`
/// becomes empty and anything else is kept as compact JSON.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
