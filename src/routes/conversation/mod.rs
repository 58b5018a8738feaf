mod list;
mod messages;

pub use list::*;
pub use messages::*;
