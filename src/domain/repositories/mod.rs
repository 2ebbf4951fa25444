//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::store`. Mock implementations are generated via
//! `mockall` for unit tests.

pub mod link_store;

pub use link_store::{LINK_KEY_PREFIX, LinkStore, StoreError, link_key};

#[cfg(test)]
pub use link_store::MockLinkStore;
