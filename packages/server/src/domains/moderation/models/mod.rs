pub mod dashboard;

pub use dashboard::{DashboardCounts, DashboardWindow, RecentSubmission, GROWTH_WINDOW_DAYS};
