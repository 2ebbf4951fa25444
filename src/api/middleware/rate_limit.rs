//! Rate limiting for the management API.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Sustained requests per second allowed per client IP.
const REQUESTS_PER_SECOND: u64 = 2;

/// Requests a client may burst before being throttled.
const BURST_SIZE: u32 = 30;

/// Creates the per-IP token bucket applied to `/api/*`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The client
/// key is the socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// The redirect path is not limited.
pub fn secure_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REQUESTS_PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
