use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// SQLite allows a single writer. Sessions read before they write, so two
/// pooled connections can deadlock upgrading their locks; the pool is kept at
/// one connection and concurrent sessions queue on acquire instead.
pub const SQLITE_MAX_CONNECTIONS: u32 = 1;

/// Configuration for the SQLite database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://./quill.db?mode=rwc`.
    pub url: String,
    /// Upper bound on pooled connections; clamped to
    /// [`SQLITE_MAX_CONNECTIONS`] for SQLite URLs.
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement through `tracing`.
    pub log_statements: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: SQLITE_MAX_CONNECTIONS,
            min_connections: 1,
            log_statements: false,
        }
    }

    /// Pool size actually used for this URL.
    pub fn effective_max_connections(&self) -> u32 {
        if self.url.starts_with("sqlite:") {
            self.max_connections.clamp(1, SQLITE_MAX_CONNECTIONS)
        } else {
            self.max_connections.max(1)
        }
    }
}

/// Open the connection pool described by `config`.
///
/// The returned handle is cheap to clone and is shared, unchanged, by every
/// session for the lifetime of the process.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let max_connections = config.effective_max_connections();
    if max_connections != config.max_connections {
        tracing::warn!(
            requested = config.max_connections,
            max_connections,
            "Clamping SQLite connection pool"
        );
    }

    let opts = ConnectOptions::new(&config.url)
        .max_connections(max_connections)
        .min_connections(config.min_connections.min(max_connections))
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(config.log_statements)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(
        url = %config.url,
        "Database connected (pool: {})",
        max_connections
    );

    Ok(conn)
}
