use serde::Serialize;

/// Canonical, shape-independent message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub create_time: String,
}
