use serde::{Deserialize, Serialize};

/// The authenticated caller, taken from a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}
