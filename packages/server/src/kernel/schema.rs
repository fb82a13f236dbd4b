//! Database schema state
//!
//! The migrations are embedded at build time. The server runs them on
//! startup and the health check compares them against the database.

use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

/// Embedded migrations from `packages/server/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Newest migration this build ships with
pub fn expected_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}

/// Newest successfully applied migration, `None` when none has run
pub async fn applied_version(pool: &PgPool) -> Result<Option<i64>> {
    sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

/// A database is current once it has applied this build's newest migration.
/// A newer database (a later build already migrated it) also counts.
pub fn is_current(applied: Option<i64>, expected: Option<i64>) -> bool {
    match (applied, expected) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(applied), Some(expected)) => applied >= expected,
    }
}
