//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP governor layer applied to the link creation route.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter.
///
/// Each client IP gets a bucket of `burst_size` requests refilled at
/// `per_second` requests per second. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// Rate limits are keyed by the socket peer address, so the server must be
/// started with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// Returns `None` if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/links", post(create_link_handler))
///     .layer(rate_limit::layer(2, 100).unwrap());
/// ```
pub fn layer(per_second: u64, burst_size: u32) -> Option<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_rejects_zero_values() {
        assert!(layer(2, 100).is_some());
        assert!(layer(0, 100).is_none());
        assert!(layer(2, 0).is_none());
    }
}
