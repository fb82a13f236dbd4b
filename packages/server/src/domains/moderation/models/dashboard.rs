use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::common::WebsiteId;
use crate::domains::website::models::{WebsiteCategory, WebsiteStatus};

/// Length of each window the growth rate compares
pub const GROWTH_WINDOW_DAYS: i64 = 30;

/// Raw dashboard counters, read in one round trip
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct DashboardCounts {
    pub total_websites: i64,
    pub total_users: i64,
    pub pending_reviews: i64,
    pub approved_today: i64,
    pub rejected_today: i64,
    pub total_views: i64,
    pub total_likes: i64,
    /// Websites created in the last window
    pub recent_websites: i64,
    /// Websites created in the window before that
    pub previous_websites: i64,
}

/// Time boundaries the dashboard counts against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindow {
    pub start_of_today: DateTime<Utc>,
    pub recent_start: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
}

impl DashboardWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        let start_of_today = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .unwrap_or(now);
        Self {
            start_of_today,
            recent_start: now - Duration::days(GROWTH_WINDOW_DAYS),
            previous_start: now - Duration::days(GROWTH_WINDOW_DAYS * 2),
        }
    }
}

/// One row of the recent submissions feed
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentSubmission {
    pub id: WebsiteId,
    pub title: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub status: WebsiteStatus,
    pub category: WebsiteCategory,
}

impl DashboardCounts {
    pub async fn load(window: &DashboardWindow, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM websites) AS total_websites,
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM websites WHERE status = 'pending') AS pending_reviews,
                (SELECT COUNT(*) FROM websites
                    WHERE status = 'approved' AND published_at >= $1) AS approved_today,
                (SELECT COUNT(*) FROM websites
                    WHERE status = 'rejected' AND updated_at >= $1) AS rejected_today,
                (SELECT COALESCE(SUM(view_count), 0)::BIGINT FROM websites) AS total_views,
                (SELECT COUNT(*) FROM website_likes) AS total_likes,
                (SELECT COUNT(*) FROM websites WHERE created_at >= $2) AS recent_websites,
                (SELECT COUNT(*) FROM websites
                    WHERE created_at >= $3 AND created_at < $2) AS previous_websites
            "#,
        )
        .bind(window.start_of_today)
        .bind(window.recent_start)
        .bind(window.previous_start)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

impl RecentSubmission {
    /// Newest submissions of any status
    pub async fn find_recent(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                w.id,
                w.title,
                COALESCE(u.name, 'Unknown User') AS submitted_by,
                w.created_at AS submitted_at,
                w.status,
                w.category
            FROM websites w
            LEFT JOIN users u ON u.id = w.submitted_by
            ORDER BY w.created_at DESC, w.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
