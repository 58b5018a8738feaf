mod detail;
mod list;

pub use detail::*;
pub use list::*;
