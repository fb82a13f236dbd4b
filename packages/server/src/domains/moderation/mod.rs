//! Moderation domain - the admin dashboard and review queue

pub mod actions;
pub mod data;
pub mod models;

pub use data::{DashboardStatsData, RecentSubmissionData};
