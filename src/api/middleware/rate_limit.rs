//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::SmartIpKeyExtractor,
};

use crate::state::AppState;

/// How clients are identified for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No limiting (tests, or when disabled by configuration).
    Disabled,
    /// Keyed by the socket peer address.
    PeerIp,
    /// Keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling back
    /// to the peer address. Only safe behind a trusted reverse proxy.
    Proxied,
}

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public pages and calculation endpoints.
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
pub const DEFAULT: Quota = Quota {
    per_second: 2,
    burst_size: 100,
};

/// Credential endpoints (`/auth/*`).
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub const STRICT: Quota = Quota {
    per_second: 1,
    burst_size: 10,
};

/// Applies a per-client limiter to `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let auth = rate_limit::apply(api::routes::auth_routes(), RateLimit::PeerIp, rate_limit::STRICT);
/// ```
pub fn apply(router: Router<AppState>, mode: RateLimit, quota: Quota) -> Router<AppState> {
    let mut builder = GovernorConfigBuilder::default();
    builder
        .per_second(quota.per_second)
        .burst_size(quota.burst_size);

    match mode {
        RateLimit::Disabled => router,
        RateLimit::PeerIp => match builder.finish() {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => invalid_quota(router, quota),
        },
        RateLimit::Proxied => match builder.key_extractor(SmartIpKeyExtractor).finish() {
            Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
            None => invalid_quota(router, quota),
        },
    }
}

fn invalid_quota(router: Router<AppState>, quota: Quota) -> Router<AppState> {
    tracing::warn!(?quota, "Invalid rate limit quota, limiter not applied");
    router
}
