use crate::models::{self, Conversation, Dialog, Message};
use serde::Serialize;

/// Header of a resolved conversation, taken from the first matching row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub id: String,
    pub tenant_id: String,
    pub create_time: String,
    pub update_time: String,
    /// Stored log text as read, before normalization.
    pub message_log: Option<String>,
}

impl From<Conversation> for ConversationDetail {
    fn from(row: Conversation) -> Self {
        Self {
            id: row.id,
            tenant_id: row.dialog_id.unwrap_or_default(),
            create_time: models::format_time(row.create_date),
            update_time: models::format_time(row.update_date),
            message_log: row.message,
        }
    }
}

impl From<Dialog> for ConversationDetail {
    // a thread row has neither a dialog_id nor a message log
    fn from(row: Dialog) -> Self {
        Self {
            id: row.id,
            tenant_id: String::new(),
            create_time: models::format_time(row.create_date),
            update_time: models::format_time(row.update_date),
            message_log: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub list: Vec<Message>,
    pub total: usize,
    pub conversation: ConversationDetail,
}
