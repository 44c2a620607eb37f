//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! a SQLite store accessed through SeaORM.

pub mod database;

pub use database::{DatabaseConfig, SqlSessionFactory};
