//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist. Rendered as e.g. `Author not found.`
    #[error("{entity_type} not found.")]
    NotFound { entity_type: &'static str, id: i64 },
}

impl DomainError {
    pub fn author_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Author",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
