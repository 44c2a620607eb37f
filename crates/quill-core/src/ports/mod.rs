//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod session;

pub use session::{Session, SessionFactory};
