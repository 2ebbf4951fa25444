//! DTOs for link management endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::CreateLink;
use crate::domain::entities::LinkRecord;

/// Hostname characters accepted for the `domain` override.
static DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9.-]*[A-Za-z0-9])?$").unwrap());

/// Request to create one short link.
///
/// `customCode` is sanitized by the service (lower-cased, restricted to
/// `[a-z0-9-]`, truncated), so only its raw length is bounded here.
///
/// Optional fields sent as `""` deserialize to `None` and count as not given.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Destination for browsers (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"), length(max = 2048))]
    pub target_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(url(message = "Invalid image URL format"), length(max = 2048))]
    pub image_url: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub custom_code: Option<String>,

    /// Serving domain override (otherwise the default domain).
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(regex(path = *DOMAIN_REGEX, message = "Invalid domain"))]
    pub domain: Option<String>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(request: CreateLinkRequest) -> Self {
        Self {
            target_url: request.target_url,
            title: request.title,
            description: request.description,
            image_url: request.image_url,
            custom_code: request.custom_code,
            domain: request.domain,
        }
    }
}

/// Query parameters for `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Only codes starting with this prefix.
    pub prefix: Option<String>,
}

/// A link record together with its public short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[serde(flatten)]
    pub record: LinkRecord,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<LinkResponse>,
}
