//! In-process link store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::codec::{decode, encode};
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LINK_KEY_PREFIX, LinkStore, StoreError, link_key};

/// A [`LinkStore`] kept in process memory.
///
/// Values are held in the same JSON encoding the Redis store uses, so the
/// read path exercises the same validation. Each operation takes the lock
/// once; nothing is held across a caller's read-modify-write, which keeps the
/// visit counter's race observable exactly as it is against Redis.
///
/// # Use Cases
///
/// - Local development without Redis
/// - Integration tests
/// - Simulating store outages via [`MemoryLinkStore::set_available`]
pub struct MemoryLinkStore {
    entries: RwLock<BTreeMap<String, String>>,
    available: AtomicBool,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self {
            entries: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggles simulated availability. While unavailable every operation
    /// fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Stores a raw value under `key`, bypassing encoding.
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store marked unavailable".to_string()))
        }
    }
}

impl Default for MemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        self.ensure_available()?;
        let key = link_key(code);
        let raw = self.entries.read().await.get(&key).cloned();

        raw.map(|raw| decode(&key, &raw)).transpose()
    }

    async fn put(&self, code: &str, record: &LinkRecord) -> Result<(), StoreError> {
        self.ensure_available()?;
        let raw = encode(record)?;
        self.entries.write().await.insert(link_key(code), raw);
        Ok(())
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        self.ensure_available()?;
        Ok(self.entries.write().await.remove(&link_key(code)).is_some())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, LinkRecord)>, StoreError> {
        self.ensure_available()?;
        let start = link_key(prefix);
        let entries = self.entries.read().await;

        let mut records = Vec::new();
        for (key, raw) in entries.range(start.clone()..) {
            if !key.starts_with(&start) {
                break;
            }

            match decode(key, raw) {
                Ok(record) => {
                    let code = key.strip_prefix(LINK_KEY_PREFIX).unwrap_or(key).to_string();
                    records.push((code, record));
                }
                Err(e) => warn!(key = %key, error = %e, "Skipping corrupt link record"),
            }
        }

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
