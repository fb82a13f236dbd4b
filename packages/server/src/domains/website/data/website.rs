use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::{CommentId, Page, WebsiteId};
use crate::domains::user::UserSummary;
use crate::domains::website::models::{
    CommentWithAuthor, Website, WebsiteCategory, WebsiteStatus, WebsiteWithDetails,
};

/// Website API representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteData {
    pub id: WebsiteId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub live_url: String,
    pub tags: Vec<String>,
    pub category: WebsiteCategory,
    pub is_popular: bool,
    pub status: WebsiteStatus,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<Website> for WebsiteData {
    fn from(website: Website) -> Self {
        Self {
            id: website.id,
            title: website.title,
            description: website.description,
            image_url: website.image_url,
            source_url: website.source_url,
            live_url: website.live_url,
            tags: website.tags,
            category: website.category,
            is_popular: website.is_popular,
            status: website.status,
            view_count: website.view_count,
            created_at: website.created_at,
            updated_at: website.updated_at,
            published_at: website.published_at,
        }
    }
}

/// Website with submitter, reviewer and engagement counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDetailsData {
    #[serde(flatten)]
    pub website: WebsiteData,
    pub like_count: i64,
    pub comment_count: i64,
    pub submitted_by: UserSummary,
    pub reviewed_by: Option<UserSummary>,
}

impl From<WebsiteWithDetails> for WebsiteDetailsData {
    fn from(row: WebsiteWithDetails) -> Self {
        let submitted_by = UserSummary {
            id: row.website.submitted_by,
            name: row.submitter_name,
            image: row.submitter_image,
        };
        let reviewed_by = match (row.website.reviewed_by, row.reviewer_name) {
            (Some(id), Some(name)) => Some(UserSummary {
                id,
                name,
                image: row.reviewer_image,
            }),
            _ => None,
        };

        Self {
            website: row.website.into(),
            like_count: row.like_count,
            comment_count: row.comment_count,
            submitted_by,
            reviewed_by,
        }
    }
}

/// Public gallery page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteListData {
    pub websites: Vec<WebsiteDetailsData>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub total_pages: i64,
}

/// Admin website table page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWebsitePage {
    pub websites: Vec<WebsiteDetailsData>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<Page<WebsiteDetailsData>> for AdminWebsitePage {
    fn from(page: Page<WebsiteDetailsData>) -> Self {
        Self {
            websites: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeData {
    pub liked: bool,
    pub like_count: i64,
}

/// Result of counting a view
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    pub view_count: i32,
}

/// Comment API representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    pub id: CommentId,
    pub website_id: WebsiteId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: UserSummary,
}

impl From<CommentWithAuthor> for CommentData {
    fn from(row: CommentWithAuthor) -> Self {
        Self {
            id: row.comment.id,
            website_id: row.comment.website_id,
            content: row.comment.content,
            created_at: row.comment.created_at,
            updated_at: row.comment.updated_at,
            author: UserSummary {
                id: row.comment.user_id,
                name: row.author_name,
                image: row.author_image,
            },
        }
    }
}
