// HTTP routes
pub mod admin;
pub mod health;
pub mod me;
pub mod websites;

pub use health::*;
