//! Host extraction and subdomain-to-code resolution.

use axum::http::{HeaderMap, header};

/// Returns the request host from the `Host` header, lower-cased and without port.
///
/// IPv6 literals keep their brackets (`[::1]:8080` becomes `[::1]`). Returns
/// `None` when the header is missing, not valid UTF-8, or empty.
pub fn extract_host(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();

    let host = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Resolves a short code from a `{code}.{domain}` host.
///
/// Returns `None` when the host has no dot, starts with `www.`, is itself one
/// of `domains`, or is not directly under one of them.
pub fn code_from_host(host: &str, domains: &[String]) -> Option<String> {
    if !host.contains('.') || host.starts_with("www.") {
        return None;
    }

    if domains.iter().any(|domain| domain.eq_ignore_ascii_case(host)) {
        return None;
    }

    domains.iter().find_map(|domain| {
        let label = host.strip_suffix(domain.as_str())?.strip_suffix('.')?;
        (!label.is_empty() && !label.contains('.')).then(|| label.to_string())
    })
}
