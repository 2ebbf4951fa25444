//! Target URL validation.
//!
//! Link targets end up in a `Location` header and in HTML attributes, so
//! only absolute `http`/`https` URLs with a host are accepted.

use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a link target and returns its serialized form.
///
/// Surrounding whitespace is trimmed. The URL is otherwise kept as written,
/// fragment included, apart from the percent-encoding and host lower-casing
/// the `url` crate applies when serializing.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for relative or malformed
/// input, [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// such as `javascript:` or `data:`, and [`UrlValidationError::MissingHost`]
/// when no host is present.
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url.to_string())
}
