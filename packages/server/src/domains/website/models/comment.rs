use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::common::{CommentId, UserId, WebsiteId};

/// WebsiteComment - append-only comment on a website
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WebsiteComment {
    pub id: CommentId,
    pub website_id: WebsiteId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment plus its author's public fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: WebsiteComment,
    pub author_name: String,
    pub author_image: Option<String>,
}

impl WebsiteComment {
    /// Append a comment
    pub async fn create<'e>(
        website_id: WebsiteId,
        user_id: UserId,
        content: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO website_comments (id, website_id, user_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(CommentId::new())
        .bind(website_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Comments on a website with their authors, newest first
    pub async fn find_for_website(
        website_id: WebsiteId,
        pool: &PgPool,
    ) -> Result<Vec<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.*, u.name AS author_name, u.image AS author_image
            FROM website_comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.website_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(website_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
