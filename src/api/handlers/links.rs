//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, ListLinksQuery,
};
use crate::domain::entities::LinkRecord;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, record: LinkRecord) -> LinkResponse {
    LinkResponse {
        short_url: state.link_service.short_url(&record),
        record,
    }
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "targetUrl": "https://example.com/landing",
///   "title": "Spring Sale",           // optional
///   "description": "50% off",         // optional
///   "imageUrl": "https://…/img.jpg",  // optional
///   "customCode": "promo1",           // optional, generated otherwise
///   "domain": "lnk.example"           // optional, default domain otherwise
/// }
/// ```
///
/// # Errors
///
/// - **400** invalid body, reserved code or unknown domain
/// - **409** code already exists
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let record = state.link_service.create_link(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, record))))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?prefix={prefix}`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<LinkListResponse>, AppError> {
    let records = state
        .link_service
        .list_links(query.prefix.as_deref().unwrap_or(""))
        .await?;

    let items: Vec<LinkResponse> = records
        .into_iter()
        .map(|record| to_response(&state, record))
        .collect();

    Ok(Json(LinkListResponse {
        total: items.len(),
        items,
    }))
}

/// `GET /api/links/{code}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let record = state.link_service.get_link(&code).await?;
    Ok(Json(to_response(&state, record)))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// Returns **204 No Content**, or **404** if the code does not exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
