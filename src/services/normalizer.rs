use crate::models::message_log::value_text;
use crate::models::{LogEntry, Message, MessageLog};
use serde_json::{Map, Value};

/// Entry keys checked, in order, for a message's own timestamp.
const TIMESTAMP_KEYS: [&str; 2] = ["created_at", "create_time"];

/// Turns a stored message log into canonical message records, oldest first.
///
/// Only list-shaped logs define messages. Objects, scalars, encoded strings,
/// raw text and unparseable content all yield an empty list; nothing here fails.
pub fn normalize(log: &MessageLog, conversation_id: &str, create_time: &str) -> Vec<Message> {
    let entries = match log {
        MessageLog::Entries(entries) => entries,
        _ => return Vec::new(),
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            LogEntry::Object(map) => Some(from_object(map, index, conversation_id, create_time)),
            LogEntry::Text(text) => Some(Message {
                id: synthesized_id(index),
                conversation_id: conversation_id.to_string(),
                role: "user".to_string(),
                content: text.clone(),
                create_time: create_time.to_string(),
            }),
            LogEntry::Other(_) => None,
        })
        .collect()
}

/// Same as [`normalize`] but starting from the column text.
pub fn normalize_raw(raw: Option<&str>, conversation_id: &str, create_time: &str) -> Vec<Message> {
    normalize(&MessageLog::from(raw), conversation_id, create_time)
}

fn from_object(
    map: &Map<String, Value>,
    index: usize,
    conversation_id: &str,
    create_time: &str,
) -> Message {
    let id = match map.get("id") {
        None | Some(Value::Null) => synthesized_id(index),
        value => value_text(value),
    };
    let role = match map.get("role") {
        None | Some(Value::Null) => "unknown".to_string(),
        value => value_text(value),
    };
    let create_time = TIMESTAMP_KEYS
        .iter()
        .find_map(|key| match map.get(*key) {
            None | Some(Value::Null) => None,
            value => Some(value_text(value)),
        })
        .unwrap_or_else(|| create_time.to_string());

    Message {
        id,
        conversation_id: conversation_id.to_string(),
        role,
        content: value_text(map.get("content")),
        create_time,
    }
}

fn synthesized_id(index: usize) -> String {
    format!("msg-{index}")
}
