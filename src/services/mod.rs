//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the offline CLI commands.

mod link_registry;

pub use link_registry::*;
