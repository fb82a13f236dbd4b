use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::WebsiteId;
use crate::domains::moderation::models::{DashboardCounts, RecentSubmission};
use crate::domains::website::models::{WebsiteCategory, WebsiteStatus};

/// Admin dashboard header numbers
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsData {
    pub total_websites: i64,
    pub total_users: i64,
    pub pending_reviews: i64,
    pub approved_today: i64,
    pub rejected_today: i64,
    pub total_views: i64,
    pub total_likes: i64,
    /// Percent change in submissions, last 30 days against the 30 before
    pub growth_rate: f64,
}

impl From<DashboardCounts> for DashboardStatsData {
    fn from(counts: DashboardCounts) -> Self {
        Self {
            total_websites: counts.total_websites,
            total_users: counts.total_users,
            pending_reviews: counts.pending_reviews,
            approved_today: counts.approved_today,
            rejected_today: counts.rejected_today,
            total_views: counts.total_views,
            total_likes: counts.total_likes,
            growth_rate: growth_rate(counts.recent_websites, counts.previous_websites),
        }
    }
}

/// Percent growth from `previous` to `recent`, rounded to one decimal.
/// Zero when there is nothing to compare against.
pub fn growth_rate(recent: i64, previous: i64) -> f64 {
    if previous <= 0 {
        return 0.0;
    }
    let rate = (recent - previous) as f64 / previous as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Recent submissions feed entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmissionData {
    pub id: WebsiteId,
    pub title: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub status: WebsiteStatus,
    pub category: WebsiteCategory,
}

impl From<RecentSubmission> for RecentSubmissionData {
    fn from(row: RecentSubmission) -> Self {
        Self {
            id: row.id,
            title: row.title,
            submitted_by: row.submitted_by,
            submitted_at: row.submitted_at,
            status: row.status,
            category: row.category,
        }
    }
}
