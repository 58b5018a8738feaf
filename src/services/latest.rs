use crate::models::message_log::value_text;
use crate::models::{LogEntry, MessageLog};

const ELLIPSIS: &str = "...";

/// Content of the newest message in a log, for list previews.
///
/// Lists yield their last element, a lone object its `content`, raw text
/// itself. An encoded string is resolved again. Anything else is empty.
pub fn latest(log: &MessageLog) -> String {
    match log {
        MessageLog::Entries(entries) => match entries.last() {
            Some(LogEntry::Object(map)) => value_text(map.get("content")),
            Some(LogEntry::Text(text)) => text.clone(),
            Some(LogEntry::Other(value)) => value_text(Some(value)),
            None => String::new(),
        },
        MessageLog::SingleObject(map) => value_text(map.get("content")),
        MessageLog::RawText(text) => text.clone(),
        // decoded text is parsed again, so multiply-encoded logs still preview
        MessageLog::Encoded(text) => latest(&MessageLog::from_text(text)),
        MessageLog::Empty | MessageLog::Scalar(_) => String::new(),
    }
}

/// [`latest`] straight from the column text.
pub fn latest_raw(raw: Option<&str>) -> String {
    latest(&MessageLog::from(raw))
}

/// Cuts `text` to `limit` characters and appends an ellipsis; text that
/// already fits is returned unchanged.
pub fn truncate_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
