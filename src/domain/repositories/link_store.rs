//! Key-value store contract for link records.

use crate::domain::entities::LinkRecord;
use async_trait::async_trait;

/// Key namespace under which link records are persisted.
pub const LINK_KEY_PREFIX: &str = "link:";

/// Builds the storage key for a short code.
pub fn link_key(code: &str) -> String {
    format!("{LINK_KEY_PREFIX}{code}")
}

/// Errors raised by a [`LinkStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transient I/O failure talking to the backing store.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored value exists but is not a valid link record.
    #[error("corrupt record at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("failed to serialize record: {0}")]
    Serialization(String),
}

/// Storage interface for link records, keyed by short code.
///
/// The store is the only shared mutable resource of the service. It offers no
/// compare-and-swap, so callers doing read-modify-write (the visit counter)
/// accept lost updates under concurrency.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryLinkStore`] - in-process store for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetches the record stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on I/O failure and
    /// [`StoreError::Corrupt`] if the stored value fails validation.
    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError>;

    /// Writes the full record under `code`, replacing any previous value.
    async fn put(&self, code: &str, record: &LinkRecord) -> Result<(), StoreError>;

    /// Removes the record under `code`.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    async fn delete(&self, code: &str) -> Result<bool, StoreError>;

    /// Lists every record whose short code starts with `prefix`.
    ///
    /// Returns `(code, record)` pairs in no particular order. Values that fail
    /// validation are skipped and logged rather than failing the listing.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, LinkRecord)>, StoreError>;

    /// Checks whether the backing store is reachable.
    async fn health_check(&self) -> bool;
}
