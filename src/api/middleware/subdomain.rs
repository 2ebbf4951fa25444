//! Host-based short link routing.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::handlers::dispatch_response;
use crate::state::AppState;
use crate::utils::extract_host::{code_from_host, extract_host};

/// Serves `{code}.{domain}` hosts as short links, whatever the path.
///
/// Requests whose host is a configured domain itself, starts with `www.`,
/// or is not under a configured domain pass through to the router.
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let code = extract_host(req.headers())
        .and_then(|host| code_from_host(&host, &state.settings.domains));

    match code {
        Some(code) => {
            debug!(code = %code, path = %req.uri().path(), "Resolved short link from host");
            dispatch_response(&state, &code, req.headers()).await
        }
        None => next.run(req).await,
    }
}
