//! Infrastructure layer for external integrations.
//!
//! Implements the storage interface defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Redis and in-memory [`crate::domain::repositories::LinkStore`] implementations

pub mod store;
