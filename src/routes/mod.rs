pub mod auth;
pub mod conversation;
pub mod health_checks;

pub use health_checks::*;
