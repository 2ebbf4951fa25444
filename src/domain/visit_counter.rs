//! Best-effort visit counting off the request path.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::repositories::{LinkStore, StoreError};

/// Result of one visit-count update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// The record was rewritten with this new count.
    Counted(u64),
    /// The record was deleted before the update ran.
    Gone,
}

/// Increments `visitCount` on link records.
///
/// The update is a plain read-modify-write against the store: a fresh `get`,
/// `+1`, then a full `put`. Two updates for the same code racing each other
/// can both read the same count and write back the same value, losing one
/// visit. The counter is therefore a lower bound under concurrency and exact
/// only for sequential traffic.
pub struct VisitCounter<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> Clone for VisitCounter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: LinkStore + ?Sized + 'static> VisitCounter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Re-reads the record and writes it back with one more visit.
    ///
    /// # Errors
    ///
    /// Propagates store failures from either the read or the write.
    pub async fn increment_visit(&self, code: &str) -> Result<VisitOutcome, StoreError> {
        let Some(mut record) = self.store.get(code).await? else {
            return Ok(VisitOutcome::Gone);
        };

        record.record_visit(Utc::now());
        self.store.put(code, &record).await?;

        Ok(VisitOutcome::Counted(record.visit_count))
    }

    /// Spawns a detached [`Self::increment_visit`] for `code`.
    ///
    /// Returns immediately. The task handle is dropped; failures are logged
    /// and counted, never reported back to the caller.
    pub fn schedule(&self, code: &str) {
        let counter = self.clone();
        let code = code.to_string();

        tokio::spawn(async move {
            match counter.increment_visit(&code).await {
                Ok(VisitOutcome::Counted(count)) => {
                    debug!(code = %code, visit_count = count, "Visit counted");
                }
                Ok(VisitOutcome::Gone) => {
                    debug!(code = %code, "Link deleted before visit could be counted");
                }
                Err(e) => {
                    metrics::counter!("linkpeek_visit_update_failures_total").increment(1);
                    warn!(code = %code, error = %e, "Visit count update failed");
                }
            }
        });
    }
}
