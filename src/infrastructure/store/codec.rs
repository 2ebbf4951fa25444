//! JSON encoding of link records for key-value storage.

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::StoreError;

/// Encodes a record as the JSON document stored under its key.
pub fn encode(record: &LinkRecord) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decodes and validates the JSON document stored under `key`.
///
/// # Errors
///
/// Returns [`StoreError::Corrupt`] if the value is not JSON or fails record
/// validation (missing `code` / `targetUrl`, relative `targetUrl`).
pub fn decode(key: &str, raw: &str) -> Result<LinkRecord, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
