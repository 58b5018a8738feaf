mod conversation;
mod dialog;
mod message;
pub mod message_log;
mod user;

pub use conversation::*;
pub use dialog::*;
pub use message::*;
pub use message_log::{LogEntry, MessageLog};
pub use user::*;

/// Display format shared by every `createTime`/`updateTime` field.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_time(time: Option<chrono::NaiveDateTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}
