//! Link record entity representing one shortened link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A shortened link together with its preview metadata and visit counter.
///
/// Serialized as camelCase JSON. Deserialization goes through [`RawLinkRecord`]
/// so that every record read from a store is validated: a record without
/// `code` or `targetUrl`, or whose `targetUrl` is not an absolute HTTP(S) URL, is
/// rejected instead of producing a half-initialized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLinkRecord")]
pub struct LinkRecord {
    pub code: String,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    /// Serving domain the short URL was issued for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visited_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Creates a fresh record with a zero visit count.
    pub fn new(new_link: NewLink, created_at: DateTime<Utc>) -> Self {
        Self {
            code: new_link.code,
            target_url: new_link.target_url,
            title: non_empty(new_link.title),
            description: non_empty(new_link.description),
            image_url: non_empty(new_link.image_url),
            visit_count: 0,
            created_at,
            domain: new_link.domain,
            last_visited_at: None,
        }
    }

    /// Title shown to humans and crawlers, falling back to the short code.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.code)
    }

    /// Applies one visit.
    pub fn record_visit(&mut self, at: DateTime<Utc>) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visited_at = Some(at);
    }
}

/// Input data for creating a new link record.
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub domain: Option<String>,
}

/// Reasons a stored value cannot become a [`LinkRecord`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("targetUrl is not an absolute HTTP(S) URL: {0}")]
    InvalidTargetUrl(String),
}

/// Wire shape accepted on read.
///
/// Accepts the legacy field names written by older deployments
/// (`subdomain`, `clicks`, `lastClick`, `lastClicked`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkRecord {
    #[serde(alias = "subdomain")]
    code: Option<String>,
    target_url: Option<String>,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    #[serde(alias = "clicks")]
    visit_count: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    domain: Option<String>,
    #[serde(alias = "lastClick", alias = "lastClicked")]
    last_visited_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawLinkRecord> for LinkRecord {
    type Error = RecordError;

    fn try_from(raw: RawLinkRecord) -> Result<Self, Self::Error> {
        let code = non_empty(raw.code).ok_or(RecordError::MissingField("code"))?;
        let target_url = non_empty(raw.target_url).ok_or(RecordError::MissingField("targetUrl"))?;

        let is_web_url = Url::parse(&target_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !is_web_url {
            return Err(RecordError::InvalidTargetUrl(target_url));
        }

        Ok(Self {
            code,
            target_url,
            title: non_empty(raw.title),
            description: non_empty(raw.description),
            image_url: non_empty(raw.image_url),
            visit_count: raw.visit_count.unwrap_or(0),
            created_at: raw.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            domain: non_empty(raw.domain),
            last_visited_at: raw.last_visited_at,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
