//! Handler for aggregate statistics.

use axum::{Json, extract::State};

use crate::application::services::LinkTotals;
use crate::error::AppError;
use crate::state::AppState;

/// Returns link and visit totals.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// { "totalLinks": 12, "totalVisits": 3407 }
/// ```
///
/// Visit totals are lower bounds; concurrent visits to one link can be
/// undercounted.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<LinkTotals>, AppError> {
    Ok(Json(state.stats_service.totals().await?))
}
