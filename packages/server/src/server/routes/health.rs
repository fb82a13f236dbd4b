use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::kernel::schema;
use crate::server::app::AppState;

const DATABASE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: DatabaseHealth,
    pub schema: SchemaHealth,
    pub pool: PoolHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    /// Database reachable but behind this build's migrations
    MigrationsPending,
    Unhealthy,
}

impl HealthStatus {
    fn evaluate(database_ok: bool, schema_current: bool) -> Self {
        match (database_ok, schema_current) {
            (false, _) => HealthStatus::Unhealthy,
            (true, false) => HealthStatus::MigrationsPending,
            (true, true) => HealthStatus::Healthy,
        }
    }

    fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Healthy => StatusCode::OK,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub ok: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaHealth {
    pub applied: Option<i64>,
    pub expected: Option<i64>,
    pub current: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolHealth {
    pub size: u32,
    pub idle: usize,
    pub max: u32,
}

/// GET /health
///
/// Reads the applied migration version, which doubles as the connectivity
/// check. 200 only when the database answers and is on this build's schema.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let pool = &state.deps.db_pool;
    let expected = schema::expected_version();

    let started = Instant::now();
    let applied = tokio::time::timeout(DATABASE_TIMEOUT, schema::applied_version(pool))
        .await
        .map_err(|_| format!("Query timeout (>{}s)", DATABASE_TIMEOUT.as_secs()))
        .and_then(|result| result.map_err(|e| format!("Query failed: {e}")));
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let (database, applied) = match applied {
        Ok(applied) => (
            DatabaseHealth {
                ok: true,
                latency_ms,
                error: None,
            },
            applied,
        ),
        Err(error) => {
            warn!(error = %error, "Health check could not read schema version");
            (
                DatabaseHealth {
                    ok: false,
                    latency_ms,
                    error: Some(error),
                },
                None,
            )
        }
    };

    let current = schema::is_current(applied, expected);
    let status = HealthStatus::evaluate(database.ok, current);

    (
        status.status_code(),
        Json(HealthResponse {
            status,
            database,
            schema: SchemaHealth {
                applied,
                expected,
                current,
            },
            pool: PoolHealth {
                size: pool.size(),
                idle: pool.num_idle(),
                max: pool.options().get_max_connections(),
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_needs_database_and_schema() {
        assert_eq!(HealthStatus::evaluate(true, true), HealthStatus::Healthy);
        assert_eq!(
            HealthStatus::evaluate(true, false),
            HealthStatus::MigrationsPending
        );
        assert_eq!(HealthStatus::evaluate(false, true), HealthStatus::Unhealthy);

        assert_eq!(HealthStatus::Healthy.status_code(), StatusCode::OK);
        assert_eq!(
            HealthStatus::MigrationsPending.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(HealthStatus::MigrationsPending).unwrap(),
            "migrations_pending"
        );
    }
}
