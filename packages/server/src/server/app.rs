//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::kernel::ServerDeps;
use crate::server::middleware::{admin_api_gate, admin_page_gate, session_auth_middleware};
use crate::server::routes::{admin, health_handler, me, websites};
use crate::server::static_files::{serve_asset, serve_page};

/// Requests running longer than this are answered with 408
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            deps: Arc::new(ServerDeps::new(db_pool, Arc::new(jwt_service))),
        }
    }
}

/// `/api/admin`: moderators and up
fn admin_api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::dashboard_stats))
        .route("/submissions/recent", get(admin::recent_submissions))
        .route("/websites", get(admin::list_websites))
        .route("/websites/:id", axum::routing::delete(admin::delete_website))
        .route("/websites/:id/status", post(admin::update_status))
        .route("/websites/:id/popular", post(admin::set_popular))
        .route("/users", get(admin::list_users))
        .route("/users/stats", get(admin::user_stats))
        .route("/users/:id", axum::routing::delete(admin::delete_user))
        .route("/users/:id/role", post(admin::update_role))
        .route_layer(middleware::from_fn(admin_api_gate))
}

/// `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/websites",
            get(websites::list_websites).post(websites::submit_website),
        )
        .route("/websites/:id", get(websites::get_website))
        .route("/websites/:id/view", post(websites::record_view))
        .route("/websites/:id/like", post(websites::toggle_like))
        .route(
            "/websites/:id/comments",
            get(websites::list_comments).post(websites::add_comment),
        )
        .route("/me", get(me::current_user))
        .route("/me/permissions", get(me::current_permissions))
        .route("/meta", get(me::meta))
        .nest("/admin", admin_api_routes())
}

/// Page shells; the admin ones behind the redirect gate
fn page_routes() -> Router<AppState> {
    let admin_pages = Router::new()
        .route("/admin", get(serve_page))
        .route("/admin/", get(serve_page))
        .route("/admin/websites", get(serve_page))
        .route("/admin/users", get(serve_page))
        .route_layer(middleware::from_fn(admin_page_gate));

    Router::new()
        .route("/", get(serve_page))
        .route("/submit", get(serve_page))
        .route("/login", get(serve_page))
        .route("/assets/*path", get(serve_asset))
        .merge(admin_pages)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // An empty list means any origin (development)
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the router without rate limiting.
///
/// Everything except the governor, so it can be driven in-process.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    build_router_with(state, allowed_origins, Router::new().nest("/api", api_routes()))
}

fn build_router_with(state: AppState, allowed_origins: &[String], api: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        .merge(page_routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the Axum application router
///
/// Adds per-IP rate limiting (10/sec with bursts of 20) to `/api`.
pub fn build_app(state: AppState, config: &Config) -> Result<Router> {
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .context("Invalid rate limiter configuration")?,
    );

    let api = Router::new().nest(
        "/api",
        api_routes().layer(GovernorLayer {
            config: rate_limit_config,
        }),
    );

    Ok(build_router_with(state, &config.allowed_origins, api))
}
