//! # Quill Core
//!
//! The domain layer of the Quill users & posts service.
//! This crate contains the domain records and the storage ports, with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
