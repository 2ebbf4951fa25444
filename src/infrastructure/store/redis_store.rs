//! Redis-backed link store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use super::codec::{decode, encode};
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LINK_KEY_PREFIX, LinkStore, StoreError, link_key};

/// Number of keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 200;

/// [`LinkStore`] persisting records as JSON strings under `link:{code}`.
///
/// Uses `ConnectionManager` for automatic reconnection. Unlike a cache, every
/// Redis error is surfaced as [`StoreError::Unavailable`]; the dispatcher
/// decides how to present it.
pub struct RedisLinkStore {
    client: ConnectionManager,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis link store");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Unavailable(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {e}")))?;

        info!("✓ Connected to Redis link store");

        Ok(Self { client: manager })
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.client.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(unavailable)?;

            keys.extend(batch);

            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once.
        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// Escapes glob metacharacters so `prefix` matches literally in `SCAN MATCH`.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        let key = link_key(code);
        let mut conn = self.client.clone();

        let raw: Option<String> = conn.get(&key).await.map_err(unavailable)?;
        debug!(code = %code, hit = raw.is_some(), "Redis GET");

        raw.map(|raw| decode(&key, &raw)).transpose()
    }

    async fn put(&self, code: &str, record: &LinkRecord) -> Result<(), StoreError> {
        let raw = encode(record)?;
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(link_key(code), raw)
            .await
            .map_err(unavailable)?;
        debug!(code = %code, "Redis SET");
        Ok(())
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();
        let deleted: i64 = conn.del(link_key(code)).await.map_err(unavailable)?;
        Ok(deleted > 0)
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, LinkRecord)>, StoreError> {
        let pattern = format!("{}*", escape_glob(&link_key(prefix)));
        let keys = self.scan_keys(&pattern).await?;

        let mut conn = self.client.clone();
        let mut records = Vec::with_capacity(keys.len());

        for chunk in keys.chunks(SCAN_BATCH) {
            let values: Vec<Option<String>> = redis::cmd("MGET")
                .arg(chunk)
                .query_async(&mut conn)
                .await
                .map_err(unavailable)?;

            for (key, value) in chunk.iter().zip(values) {
                // Deleted between SCAN and MGET.
                let Some(raw) = value else { continue };

                match decode(key, &raw) {
                    Ok(record) => {
                        let code = key.strip_prefix(LINK_KEY_PREFIX).unwrap_or(key);
                        records.push((code.to_string(), record));
                    }
                    Err(e) => warn!(key = %key, error = %e, "Skipping corrupt link record"),
                }
            }
        }

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
