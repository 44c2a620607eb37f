//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::database::{DatabaseConfig, SQLITE_MAX_CONNECTIONS};

/// Default store: a SQLite file next to the process working directory,
/// created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./quill.db?mode=rwc";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let database = DatabaseConfig {
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SQLITE_MAX_CONNECTIONS),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            log_statements: env::var("DB_LOG_STATEMENTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            ..DatabaseConfig::new(url)
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
        }
    }
}
