//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`          - Short link dispatch (public)
//! - any path on `{code}.{domain}` - Short link dispatch (public)
//! - `GET  /health`          - Link store health (public)
//! - `/api/*`                - Management API (Bearer token required)
//!
//! Anything else gets the not-found page.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Host routing** - `{code}.{domain}` hosts short-circuit to dispatch
//! - **Rate limiting** - Per-IP token bucket on `/api/*`
//! - **Authentication** - Bearer admin key on `/api/*`
//! - **Path normalization** - Trailing slash handling

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, subdomain, tracing};
use crate::state::AppState;
use crate::web::pages::NotFoundPage;

/// Builds the router with all routes and middleware except path normalization.
pub fn build_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), subdomain::layer))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router wrapped in trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    let code = uri.path().trim_matches('/').to_string();
    (StatusCode::NOT_FOUND, NotFoundPage { code })
}
