// Main entry point for API server

use anyhow::{Context, Result};
use showcase_core::domains::auth::JwtService;
use showcase_core::kernel::MIGRATOR;
use showcase_core::server::{build_app, AppState};
use showcase_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,showcase_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Website Showcase API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations complete");
    }

    // Build application
    let jwt_service = JwtService::new(&config.session_secret, config.session_issuer.clone());
    let app = build_app(AppState::new(pool, jwt_service), &config)?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Gallery: http://localhost:{}/", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
