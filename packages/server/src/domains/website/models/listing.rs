//! Enriched website listings
//!
//! One statement per page: the submitter is joined, the reviewer is left
//! joined, and like/comment counts are correlated subqueries. The count
//! query shares the exact same filter.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::website::{Website, WebsiteCategory, WebsiteStatus};
use crate::common::search::contains_pattern;
use crate::common::{ValidatedPageArgs, WebsiteId};

/// Conjunctive listing filter. `None` fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebsiteFilters {
    /// Title/description substring
    pub search: Option<String>,
    /// Let `search` also match an exact tag (the public gallery does)
    pub search_tags: bool,
    pub category: Option<WebsiteCategory>,
    pub is_popular: Option<bool>,
    pub status: Option<WebsiteStatus>,
}

impl WebsiteFilters {
    /// Filters for the public gallery: approved websites only, search
    /// matching tags too.
    pub fn public() -> Self {
        Self {
            status: Some(WebsiteStatus::Approved),
            search_tags: true,
            ..Default::default()
        }
    }
}

/// Listing sort keys. Every key falls back to newest-first, then id.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Popular,
    Views,
    Likes,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Newest,
        SortBy::Oldest,
        SortBy::Popular,
        SortBy::Views,
        SortBy::Likes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::Popular => "popular",
            SortBy::Views => "views",
            SortBy::Likes => "likes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::Newest => "Newest",
            SortBy::Oldest => "Oldest",
            SortBy::Popular => "Most Popular",
            SortBy::Views => "Most Viewed",
            SortBy::Likes => "Most Liked",
        }
    }

    /// ORDER BY clause; always a total order.
    fn order_clause(self) -> &'static str {
        match self {
            SortBy::Newest => "w.created_at DESC, w.id DESC",
            SortBy::Oldest => "w.created_at ASC, w.id ASC",
            SortBy::Popular => "w.is_popular DESC, w.created_at DESC, w.id DESC",
            SortBy::Views => "w.view_count DESC, w.created_at DESC, w.id DESC",
            SortBy::Likes => "like_count DESC, w.created_at DESC, w.id DESC",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid sort option: {}", s))
    }
}

/// A website plus its submitter, reviewer and engagement counts
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WebsiteWithDetails {
    #[sqlx(flatten)]
    pub website: Website,
    pub submitter_name: String,
    pub submitter_image: Option<String>,
    pub reviewer_name: Option<String>,
    pub reviewer_image: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
}

const DETAILS_SELECT: &str = r#"
    SELECT
        w.*,
        s.name AS submitter_name,
        s.image AS submitter_image,
        r.name AS reviewer_name,
        r.image AS reviewer_image,
        (SELECT COUNT(*) FROM website_likes l WHERE l.website_id = w.id) AS like_count,
        (SELECT COUNT(*) FROM website_comments c WHERE c.website_id = w.id) AS comment_count
    FROM websites w
    JOIN users s ON s.id = w.submitted_by
    LEFT JOIN users r ON r.id = w.reviewed_by
"#;

// $1 status, $2 raw search term, $3 escaped ILIKE pattern, $4 category, $5 popular,
// $6 whether the search term may match a tag
const LISTING_FILTER: &str = r#"
    WHERE ($1::website_status IS NULL OR w.status = $1)
      AND ($2::text IS NULL
           OR w.title ILIKE $3 ESCAPE '\'
           OR w.description ILIKE $3 ESCAPE '\'
           OR ($6::boolean AND w.tags && ARRAY[$2::text]))
      AND ($4::website_category IS NULL OR w.category = $4)
      AND ($5::boolean IS NULL OR w.is_popular = $5)
"#;

impl WebsiteWithDetails {
    /// One page of websites matching `filters`, ordered by `sort`.
    pub async fn find_listing(
        filters: &WebsiteFilters,
        sort: SortBy,
        args: &ValidatedPageArgs,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let sql = format!(
            "{DETAILS_SELECT} {LISTING_FILTER} ORDER BY {} LIMIT $7 OFFSET $8",
            sort.order_clause()
        );
        let pattern = filters.search.as_deref().map(contains_pattern);

        sqlx::query_as::<_, Self>(&sql)
            .bind(filters.status)
            .bind(&filters.search)
            .bind(&pattern)
            .bind(filters.category)
            .bind(filters.is_popular)
            .bind(filters.search_tags)
            .bind(args.limit)
            .bind(args.offset)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Size of the unpaginated set `find_listing` pages through.
    pub async fn count_listing(filters: &WebsiteFilters, pool: &PgPool) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM websites w {LISTING_FILTER}");
        let pattern = filters.search.as_deref().map(contains_pattern);

        sqlx::query_scalar(&sql)
            .bind(filters.status)
            .bind(&filters.search)
            .bind(&pattern)
            .bind(filters.category)
            .bind(filters.is_popular)
            .bind(filters.search_tags)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// A single enriched website, whatever its status
    pub async fn find_detail_by_id(id: WebsiteId, pool: &PgPool) -> Result<Option<Self>> {
        let sql = format!("{DETAILS_SELECT} WHERE w.id = $1");
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
