//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates management requests against the admin key.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <ADMIN_KEY>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header
/// is missing, malformed, or carries the wrong key.
///
/// # Example
///
/// ```rust,ignore
/// let protected = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    st.auth_service.authenticate(&token)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
