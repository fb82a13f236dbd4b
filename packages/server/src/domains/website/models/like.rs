use anyhow::Result;
use sqlx::{PgExecutor, PgPool};

use crate::common::{LikeId, UserId, WebsiteId};

/// WebsiteLike - one row per (website, user) pair
pub struct WebsiteLike;

/// Postgres foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl WebsiteLike {
    /// Flip the caller's like on a website in one statement.
    ///
    /// The pair is deleted if present, otherwise inserted. The unique
    /// constraint absorbs a concurrent insert of the same pair. Returns the
    /// new state (`true` = liked), or `None` if the website does not exist.
    pub async fn toggle(
        website_id: WebsiteId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<bool>> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            WITH removed AS (
                DELETE FROM website_likes
                WHERE website_id = $1 AND user_id = $2
                RETURNING 1
            ),
            inserted AS (
                INSERT INTO website_likes (id, website_id, user_id)
                SELECT $3, $1, $2
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT ON CONSTRAINT website_like_website_user_key DO NOTHING
                RETURNING 1
            )
            SELECT NOT EXISTS (SELECT 1 FROM removed)
            "#,
        )
        .bind(website_id)
        .bind(user_id)
        .bind(LikeId::new())
        .fetch_one(pool)
        .await;

        match result {
            Ok(liked) => Ok(Some(liked)),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a user currently likes a website
    pub async fn exists(website_id: WebsiteId, user_id: UserId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM website_likes WHERE website_id = $1 AND user_id = $2)",
        )
        .bind(website_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Current like count of a website
    pub async fn count_for_website(website_id: WebsiteId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM website_likes WHERE website_id = $1")
            .bind(website_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Record a like without toggling (seeding). Existing pairs are left alone.
    pub async fn insert<'e>(
        website_id: WebsiteId,
        user_id: UserId,
        executor: impl PgExecutor<'e>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO website_likes (id, website_id, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT website_like_website_user_key DO NOTHING
            "#,
        )
        .bind(LikeId::new())
        .bind(website_id)
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(())
    }
}
