use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A conversation row holding a message log. `message` is the column read as text;
/// its shape is resolved by [`crate::models::MessageLog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: String,
    pub dialog_id: Option<String>,
    pub name: Option<String>,
    pub message: Option<String>,
    pub create_date: Option<NaiveDateTime>,
    pub update_date: Option<NaiveDateTime>,
}

/// One row of a paginated list, whichever relation it came from.
/// `owner` is `tenant_id` for threads and `dialog_id` for conversations.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct ListRow {
    pub id: String,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub create_date: Option<NaiveDateTime>,
    pub update_date: Option<NaiveDateTime>,
}
