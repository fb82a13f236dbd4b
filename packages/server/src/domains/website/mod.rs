//! Website domain - submissions, the public gallery, likes and comments

pub mod actions;
pub mod data;
pub mod models;

pub use data::{WebsiteData, WebsiteDetailsData};
pub use models::{
    ReviewDecision, SortBy, Website, WebsiteCategory, WebsiteFilters, WebsiteStatus,
    WebsiteWithDetails,
};
