//! Management API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    stats_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /links`          - List links, newest first (`?prefix=` filter)
/// - `POST   /links`          - Create a short link
/// - `GET    /links/{code}`   - Fetch one link
/// - `DELETE /links/{code}`   - Delete a link
/// - `GET    /stats`          - Link and visit totals
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/stats", get(stats_handler))
}
