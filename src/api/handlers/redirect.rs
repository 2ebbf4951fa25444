//! Handler for short link dispatch.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::application::services::Dispatch;
use crate::config::RedirectStrategy;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::pages::{ErrorPage, LinkPage, NotFoundPage};

/// Serves a short link by path.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Requests on `{code}.{domain}` hosts reach [`dispatch_response`] through
/// [`crate::api::middleware::subdomain`] instead.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    dispatch_response(&state, &code, &headers).await
}

/// Resolves `code` and renders the answer for the requesting agent.
///
/// # Responses
///
/// - **200 OK** (crawler): metadata page, `Cache-Control: public, max-age=…`
/// - **302 Found** (browser, `http` strategy): `Location: targetUrl`
/// - **200 OK** (browser, `interstitial` strategy): page that navigates after a delay
/// - **404 Not Found**: HTML page naming the code
/// - **503 Service Unavailable**: generic HTML page
///
/// Every response for a resolved code carries `Vary: User-Agent`, since the
/// same URL answers crawlers and browsers differently. The visit counter is
/// updated in the background for every resolved code.
pub async fn dispatch_response(state: &AppState, code: &str, headers: &HeaderMap) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match state.dispatcher.dispatch(code, user_agent).await {
        Ok(Dispatch::Preview(record)) => {
            let cache_control = format!(
                "public, max-age={}",
                state.settings.preview_cache_seconds
            );
            vary_on_agent(
                (
                    [(header::CACHE_CONTROL, cache_control)],
                    LinkPage::for_crawler(&record),
                )
                    .into_response(),
            )
        }
        Ok(Dispatch::Navigate(record)) => vary_on_agent(match state.settings.redirect {
            RedirectStrategy::Http => {
                (StatusCode::FOUND, [(header::LOCATION, record.target_url)]).into_response()
            }
            RedirectStrategy::Interstitial { delay_seconds } => {
                LinkPage::interstitial(&record, delay_seconds).into_response()
            }
        }),
        Err(AppError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            NotFoundPage {
                code: code.to_string(),
            },
        )
            .into_response(),
        Err(e) => {
            warn!(code = %code, error = %e, "Short link dispatch failed");
            (StatusCode::SERVICE_UNAVAILABLE, ErrorPage::unavailable()).into_response()
        }
    }
}

fn vary_on_agent(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static("User-Agent"));
    response
}
