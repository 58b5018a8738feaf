mod list;
mod login;

pub use list::*;
pub use login::*;
