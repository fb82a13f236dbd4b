use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{UserId, WebsiteId};

/// Website - a submitted showcase entry (requires approval before it is public)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Website {
    pub id: WebsiteId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub live_url: String,
    pub tags: Vec<String>,
    pub category: WebsiteCategory,
    pub is_popular: bool,

    // Approval workflow
    pub status: WebsiteStatus,
    pub submitted_by: UserId,
    pub reviewed_by: Option<UserId>,

    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set the first time the website is approved, never cleared
    pub published_at: Option<DateTime<Utc>>,
}

/// Website status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "website_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WebsiteStatus {
    Pending,
    Approved,
    Rejected,
}

impl WebsiteStatus {
    pub const ALL: [WebsiteStatus; 3] = [
        WebsiteStatus::Pending,
        WebsiteStatus::Approved,
        WebsiteStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WebsiteStatus::Pending => "pending",
            WebsiteStatus::Approved => "approved",
            WebsiteStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WebsiteStatus::Pending => "Pending Review",
            WebsiteStatus::Approved => "Approved",
            WebsiteStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for WebsiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WebsiteStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(WebsiteStatus::Pending),
            "approved" => Ok(WebsiteStatus::Approved),
            "rejected" => Ok(WebsiteStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid website status: {}", s)),
        }
    }
}

/// A moderator's verdict on a submission. Pending is not a valid target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for WebsiteStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => WebsiteStatus::Approved,
            ReviewDecision::Rejected => WebsiteStatus::Rejected,
        }
    }
}

/// Website category, a closed list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "website_category", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteCategory {
    #[sqlx(rename = "e-commerce")]
    #[serde(rename = "e-commerce")]
    ECommerce,
    Portfolio,
    Blog,
    LandingPage,
    Dashboard,
    Saas,
    Marketing,
    Education,
    Finance,
    Healthcare,
    Entertainment,
    Social,
    Productivity,
    Other,
}

impl WebsiteCategory {
    pub const ALL: [WebsiteCategory; 14] = [
        WebsiteCategory::ECommerce,
        WebsiteCategory::Portfolio,
        WebsiteCategory::Blog,
        WebsiteCategory::LandingPage,
        WebsiteCategory::Dashboard,
        WebsiteCategory::Saas,
        WebsiteCategory::Marketing,
        WebsiteCategory::Education,
        WebsiteCategory::Finance,
        WebsiteCategory::Healthcare,
        WebsiteCategory::Entertainment,
        WebsiteCategory::Social,
        WebsiteCategory::Productivity,
        WebsiteCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WebsiteCategory::ECommerce => "e-commerce",
            WebsiteCategory::Portfolio => "portfolio",
            WebsiteCategory::Blog => "blog",
            WebsiteCategory::LandingPage => "landing-page",
            WebsiteCategory::Dashboard => "dashboard",
            WebsiteCategory::Saas => "saas",
            WebsiteCategory::Marketing => "marketing",
            WebsiteCategory::Education => "education",
            WebsiteCategory::Finance => "finance",
            WebsiteCategory::Healthcare => "healthcare",
            WebsiteCategory::Entertainment => "entertainment",
            WebsiteCategory::Social => "social",
            WebsiteCategory::Productivity => "productivity",
            WebsiteCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WebsiteCategory::ECommerce => "E-commerce",
            WebsiteCategory::Portfolio => "Portfolio",
            WebsiteCategory::Blog => "Blog",
            WebsiteCategory::LandingPage => "Landing Page",
            WebsiteCategory::Dashboard => "Dashboard",
            WebsiteCategory::Saas => "SaaS",
            WebsiteCategory::Marketing => "Marketing",
            WebsiteCategory::Education => "Education",
            WebsiteCategory::Finance => "Finance",
            WebsiteCategory::Healthcare => "Healthcare",
            WebsiteCategory::Entertainment => "Entertainment",
            WebsiteCategory::Social => "Social",
            WebsiteCategory::Productivity => "Productivity",
            WebsiteCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for WebsiteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WebsiteCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        WebsiteCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid website category: {}", s))
    }
}

/// Fields of a new submission, already validated
#[derive(Debug, Clone)]
pub struct NewWebsite {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub live_url: String,
    pub tags: Vec<String>,
    pub category: WebsiteCategory,
}

/// Moderation state carried over when importing existing records
#[derive(Debug, Clone)]
pub struct ImportedState {
    pub status: WebsiteStatus,
    pub is_popular: bool,
    pub view_count: i32,
    pub reviewed_by: Option<UserId>,
    pub published_at: Option<DateTime<Utc>>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Website {
    /// Find website by ID
    pub async fn find_by_id(id: WebsiteId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM websites WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Create a submission. New websites always start out pending.
    pub async fn create(new: &NewWebsite, submitted_by: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO websites (
                id, title, description, image_url, source_url, live_url,
                tags, category, status, submitted_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            RETURNING *
            "#,
        )
        .bind(WebsiteId::new())
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(&new.source_url)
        .bind(&new.live_url)
        .bind(&new.tags)
        .bind(new.category)
        .bind(submitted_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a website together with its moderation state (seeding)
    pub async fn import<'e>(
        new: &NewWebsite,
        state: &ImportedState,
        submitted_by: UserId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO websites (
                id, title, description, image_url, source_url, live_url,
                tags, category, status, is_popular, view_count,
                submitted_by, reviewed_by, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(WebsiteId::new())
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(&new.source_url)
        .bind(&new.live_url)
        .bind(&new.tags)
        .bind(new.category)
        .bind(state.status)
        .bind(state.is_popular)
        .bind(state.view_count)
        .bind(submitted_by)
        .bind(state.reviewed_by)
        .bind(state.published_at)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Approve or reject a website.
    ///
    /// Any status may move to any other. Approval stamps `published_at`;
    /// rejection leaves an earlier stamp in place. Returns `None` if the
    /// website does not exist.
    pub async fn update_status(
        id: WebsiteId,
        decision: ReviewDecision,
        reviewed_by: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE websites
            SET status = $2,
                reviewed_by = $3,
                updated_at = NOW(),
                published_at = CASE WHEN $2 = 'approved'::website_status THEN NOW() ELSE published_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(WebsiteStatus::from(decision))
        .bind(reviewed_by)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Set or clear the popular flag
    pub async fn set_popular(id: WebsiteId, is_popular: bool, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE websites
            SET is_popular = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_popular)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Count one view of an approved website.
    ///
    /// Returns the new view count, or `None` if no approved website has this id.
    pub async fn increment_views(id: WebsiteId, pool: &PgPool) -> Result<Option<i32>> {
        sqlx::query_scalar(
            r#"
            UPDATE websites
            SET view_count = view_count + 1
            WHERE id = $1 AND status = 'approved'
            RETURNING view_count
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Whether an approved website with this id exists
    pub async fn is_public(id: WebsiteId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM websites WHERE id = $1 AND status = 'approved')",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a website; its likes and comments cascade.
    ///
    /// Returns whether a row was deleted.
    pub async fn delete(id: WebsiteId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in WebsiteCategory::ALL {
            assert_eq!(category.as_str().parse::<WebsiteCategory>().unwrap(), category);
        }
        assert!("ecommerce".parse::<WebsiteCategory>().is_err());
    }

    #[test]
    fn test_category_serde_uses_kebab_values() {
        let json = serde_json::to_string(&WebsiteCategory::ECommerce).unwrap();
        assert_eq!(json, "\"e-commerce\"");
        let json = serde_json::to_string(&WebsiteCategory::LandingPage).unwrap();
        assert_eq!(json, "\"landing-page\"");

        let parsed: WebsiteCategory = serde_json::from_str("\"saas\"").unwrap();
        assert_eq!(parsed, WebsiteCategory::Saas);
    }

    #[test]
    fn test_labels() {
        assert_eq!(WebsiteCategory::Saas.label(), "SaaS");
        assert_eq!(WebsiteCategory::ECommerce.label(), "E-commerce");
        assert_eq!(WebsiteStatus::Pending.label(), "Pending Review");
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in WebsiteStatus::ALL {
            assert_eq!(status.to_string().parse::<WebsiteStatus>().unwrap(), status);
        }
        assert!("suspended".parse::<WebsiteStatus>().is_err());
    }

    #[test]
    fn test_review_decision_never_maps_to_pending() {
        assert_eq!(WebsiteStatus::from(ReviewDecision::Approved), WebsiteStatus::Approved);
        assert_eq!(WebsiteStatus::from(ReviewDecision::Rejected), WebsiteStatus::Rejected);
        assert!(serde_json::from_str::<ReviewDecision>("\"pending\"").is_err());
    }
}
