use serde::Serialize;

/// One row of a conversation list or search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: String,
    pub name: String,
    pub latest_message: String,
    pub create_time: String,
    pub update_time: String,
    /// Longer preview, global search only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Linked thread id, global search only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListPayload<T: Serialize> {
    pub list: Vec<T>,
    pub total: i64,
}
