//! HTTP request/response tracing middleware.

use axum::{body::Body, http::Request, http::header};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

type MakeSpanFn = fn(&Request<Body>) -> Span;

/// Opens the per-request span.
///
/// The `Host` header is recorded because short links are also served on
/// `{code}.{domain}` hosts, where the path alone does not identify the link.
fn make_span(req: &Request<Body>) -> Span {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info_span!(
        "request",
        method = %req.method(),
        host = %host,
        uri = %req.uri(),
        version = ?req.version(),
    )
}

/// Creates a tracing middleware for HTTP requests.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET host=promo1.lnk.example uri=/ version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// INFO request{method=POST host=lnk.example uri=/api/links version=HTTP/1.1}: finished processing request latency=3 ms status=201
/// ```
pub fn layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpanFn,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
