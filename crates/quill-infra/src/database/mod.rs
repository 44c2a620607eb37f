//! Database connection management, schema and sessions.

mod connections;
mod schema;
mod session;

pub mod entity;

pub use connections::{DatabaseConfig, SQLITE_MAX_CONNECTIONS, connect};
pub use sea_orm::DbErr;
pub use schema::ensure_schema;
pub use session::{SqlSession, SqlSessionFactory};
