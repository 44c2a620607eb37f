//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::SessionFactory;
use quill_infra::database::{DatabaseConfig, DbErr, SqlSessionFactory};

/// Shared application state.
///
/// Holds only the session factory; it is built once at startup and never
/// mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionFactory>,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self { sessions }
    }

    /// Connect to storage, bootstrap the schema and build the state.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let factory = SqlSessionFactory::connect(config).await?;
        tracing::info!("Application state initialized");
        Ok(Self::new(Arc::new(factory)))
    }
}
