mod login;

pub use login::*;
pub use test::*;
