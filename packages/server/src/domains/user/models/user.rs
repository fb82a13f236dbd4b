use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::common::auth::{Actor, UserRole};
use crate::common::search::contains_pattern;
use crate::common::{UserId, ValidatedPageArgs};
use crate::domains::auth::SessionIdentity;

/// User model - SQL persistence layer
///
/// Identity fields mirror the identity provider's claims. `role` is owned
/// here and only changes through the admin role update.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Number of users holding each role
#[derive(sqlx::FromRow, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub total: i64,
    pub users: i64,
    pub moderators: i64,
    pub admins: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Authorization handle for this user's stored role
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }

    /// The identity a session token for this user carries
    pub fn session_identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            email_verified: self.email_verified,
        }
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find or create the user a verified session belongs to.
    ///
    /// New users get the `user` role. An existing row is returned untouched,
    /// so its stored role always wins over anything in the token.
    pub async fn find_or_create_from_claims(
        identity: &SessionIdentity,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, name, email, email_verified, image, role)
            VALUES ($1, $2, $3, $4, $5, 'user')
            ON CONFLICT (id) DO UPDATE SET id = users.id
            RETURNING *
            "#,
        )
        .bind(identity.user_id)
        .bind(&identity.name)
        .bind(&identity.email)
        .bind(identity.email_verified)
        .bind(&identity.image)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a user with an explicit role (seeding)
    pub async fn create<'e>(
        id: UserId,
        name: &str,
        email: &str,
        email_verified: bool,
        image: Option<&str>,
        role: UserRole,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, name, email, email_verified, image, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(email_verified)
        .bind(image)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Find all users with a role, newest first
    pub async fn find_by_role(role: UserRole, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(role)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Admin user table: optional name/email search, newest first.
    ///
    /// Returns the page and the total matching count.
    pub async fn find_admin_list(
        search: Option<&str>,
        args: &ValidatedPageArgs,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let pattern = search.map(contains_pattern);

        let users = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(args.limit)
        .bind(args.offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')
            "#,
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((users, total))
    }

    /// Count all users
    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Total users plus a count per role
    pub async fn stats(pool: &PgPool) -> Result<RoleCounts> {
        sqlx::query_as::<_, RoleCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE role = 'user') AS users,
                COUNT(*) FILTER (WHERE role = 'moderator') AS moderators,
                COUNT(*) FILTER (WHERE role = 'admin') AS admins
            FROM users
            "#,
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Change a user's role. Returns `None` if the user does not exist.
    pub async fn update_role(id: UserId, role: UserRole, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a user; websites, likes and comments they own cascade.
    ///
    /// Returns whether a row was deleted.
    pub async fn delete(id: UserId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every user. Websites, likes and comments go with them.
    ///
    /// Returns the number of users deleted.
    pub async fn delete_all<'e>(executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
