//! # Quill Shared
//!
//! Wire shapes shared by the API server and its clients: request/response
//! DTOs, their validation rules, and the problem-details error body.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorResponse, FieldViolation};
