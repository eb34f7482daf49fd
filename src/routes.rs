//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`, `/health/ready` - Liveness and readiness (public)
//! - `/auth/*`                       - Registration, login, refresh, logout
//! - `/calculations/*`               - Calculation history (Bearer token required)
//! - `/`, `/login`, `/register`      - Public HTML pages
//! - `/dashboard/*`                  - HTML pages (cookie session required)
//! - `/static/*`                     - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on `/auth`
//! - **Authentication** - Bearer token (API) or `access_token` cookie (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, readiness_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

pub use crate::api::middleware::rate_limit::RateLimit;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - client identification for the per-IP limiter;
///   [`RateLimit::Disabled`] turns it off (tests have no peer address)
pub fn app_router(state: AppState, rate_limit: RateLimit) -> NormalizePath<Router> {
    let auth_public = api::routes::auth_public_routes();
    let auth_protected = api::routes::auth_protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let auth_router = rate_limit::apply(
        auth_public.merge(auth_protected),
        rate_limit,
        rate_limit::STRICT,
    );

    let calculations_router = rate_limit::apply(
        api::routes::calculation_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        rate_limit,
        rate_limit::DEFAULT,
    );

    let web_protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    );
    let web_router = rate_limit::apply(
        web::routes::public_routes().nest("/dashboard", web_protected),
        rate_limit,
        rate_limit::DEFAULT,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        .nest("/auth", auth_router)
        .nest("/calculations", calculations_router)
        .merge(web_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
