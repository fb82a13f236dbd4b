//! User domain - accounts created from identity provider sessions

pub mod actions;
pub mod data;
pub mod models;

pub use data::{UserData, UserStatsData, UserSummary};
pub use models::{RoleCounts, User};
