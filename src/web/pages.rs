//! HTML pages served on the redirect path.
//!
//! Templates live in `templates/` and are auto-escaped by Askama. None of the
//! pages depend on the visit count or the clock, so one record always renders
//! to the same bytes.

use askama::Template;
use askama_web::WebTemplate;

use crate::domain::entities::LinkRecord;

/// Seconds before the crawler page's meta refresh moves a reader on.
pub const CRAWLER_REFRESH_SECONDS: u64 = 3;

/// Link page for `templates/link_page.html`.
///
/// Both variants end in a meta refresh and a fallback link to the target, so
/// a person misclassified as a crawler still gets there.
/// Browsers under the interstitial strategy additionally get a script that
/// follows the `#continue` anchor after the delay.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "link_page.html")]
pub struct LinkPage {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub target_url: String,
    pub refresh: bool,
    pub navigate: bool,
    pub delay_seconds: u64,
    pub delay_ms: u64,
}

impl LinkPage {
    /// Metadata page for a preview crawler. Served with status 200; only the
    /// meta refresh points onward.
    pub fn for_crawler(record: &LinkRecord) -> Self {
        Self {
            title: record.display_title().to_string(),
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            target_url: record.target_url.clone(),
            refresh: true,
            navigate: false,
            delay_seconds: CRAWLER_REFRESH_SECONDS,
            delay_ms: CRAWLER_REFRESH_SECONDS * 1000,
        }
    }

    /// Interstitial page that moves a browser on after `delay_seconds`.
    pub fn interstitial(record: &LinkRecord, delay_seconds: u64) -> Self {
        Self {
            navigate: true,
            delay_seconds,
            delay_ms: delay_seconds.saturating_mul(1000),
            ..Self::for_crawler(record)
        }
    }
}

/// 404 page naming the requested code.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub code: String,
}

/// Generic failure page. Carries no internal detail.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
}

impl ErrorPage {
    pub fn unavailable() -> Self {
        Self {
            message: "This link cannot be resolved right now. Please try again shortly.".to_string(),
        }
    }
}
