use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A thread ("dialog") row. Read-only here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Dialog {
    pub id: String,
    pub tenant_id: Option<String>,
    pub name: Option<String>,
    pub create_date: Option<NaiveDateTime>,
    pub update_date: Option<NaiveDateTime>,
}
