//! Aggregate link statistics.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::repositories::LinkStore;
use crate::error::AppError;

/// Totals across every stored link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTotals {
    pub total_links: u64,
    pub total_visits: u64,
}

/// Service computing aggregate statistics from the link store.
///
/// Totals are computed by scanning every record; visit counts are lower
/// bounds, see [`crate::domain::visit_counter::VisitCounter`].
pub struct StatsService<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> StatsService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Counts links and sums their visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store cannot be listed.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        let records = self.store.list_by_prefix("").await?;

        Ok(LinkTotals {
            total_links: records.len() as u64,
            total_visits: records
                .iter()
                .map(|(_, record)| record.visit_count)
                .fold(0u64, u64::saturating_add),
        })
    }
}
