// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod id;
pub mod pagination;
pub mod search;

pub use auth::{Actor, AuthError, Capability, GuardOutcome, Permissions, RoleGuard, UserRole};
pub use entity_ids::*;
pub use id::Id;
pub use pagination::{total_pages, Page, PageArgs, ValidatedPageArgs};
