//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container per test binary, started on first use and shared
//! by every test in it. Tests share the database, so fixtures use unique
//! names and assertions are scoped to rows the test created.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use showcase_core::domains::auth::JwtService;
use showcase_core::domains::user::User;
use showcase_core::kernel::{ServerDeps, MIGRATOR};
use showcase_core::server::{build_router, AppState};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-session-secret";
const TEST_ISSUER: &str = "showcase-test";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness with a fresh pool, the app state and a token issuer.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let admin = create_test_user(&ctx.db_pool, UserRole::Admin).await;
///     let response = ctx.get("/api/admin/stats", Some(&admin)).await;
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub state: AppState,
    pub jwt: JwtService,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let jwt = JwtService::new(TEST_SECRET, TEST_ISSUER.to_string());
        let state = AppState::new(db_pool.clone(), jwt.clone());

        Ok(Self {
            db_pool,
            state,
            jwt,
        })
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.state.deps
    }

    /// Router without rate limiting
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &[])
    }

    /// A session token for a stored user
    pub fn token_for(&self, user: &User) -> String {
        self.jwt
            .create_token(&user.session_identity())
            .expect("Failed to create session token")
    }

    /// Send a request through the router, signed in as `user` if given
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user: Option<&User>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(user)),
            );
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str, user: Option<&User>) -> Response<Body> {
        self.send("GET", uri, user, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        user: Option<&User>,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send("POST", uri, user, Some(body)).await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
