use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub session_secret: String,
    pub session_issuer: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            session_secret: env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?,
            session_issuer: env::var("SESSION_ISSUER")
                .unwrap_or_else(|_| "showcase".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|s| parse_flag(&s))
                .unwrap_or(true),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
