//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`          - Short link redirect, scoped by `Host`
//! - `POST /api/v1/links`    - Create a short link
//! - `GET  /api/v1/healthz`  - Store health check
//!
//! Anything else answers `404` with the standard error envelope.
//!
//! # Middleware
//!
//! - **Request id** - `x-request-id` assigned per request and echoed back
//! - **Tracing** - Structured request/response logging tagged with the id
//! - **Rate limiting** - Per-IP token bucket on link creation (optional)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState, rate_limit: Option<RateLimitLayer>) -> Router {
    Router::new()
        .route("/{slug}", get(redirect_handler))
        .nest("/api/v1", api::routes::api_routes(rate_limit))
        .fallback(route_not_found)
        .with_state(state)
        .layer(tracing::propagate_request_id_layer())
        .layer(tracing::layer())
        .layer(tracing::set_request_id_layer())
}

/// Constructs the application service.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter for link creation; requires the server to
///   provide `ConnectInfo<SocketAddr>`
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limit))
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}
