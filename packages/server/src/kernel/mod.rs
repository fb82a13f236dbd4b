//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod schema;

pub use deps::ServerDeps;
pub use schema::MIGRATOR;
