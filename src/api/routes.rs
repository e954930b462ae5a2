//! API route configuration.
//!
//! Authentication is per request: the creation handler resolves the calling
//! app from `X-API-Key` itself, after the body has been validated.

use crate::api::handlers::{create_link_handler, health_handler};
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /links`   - Create a short link (rate limited when `rate_limit` is set)
/// - `GET  /healthz` - Store connectivity check
pub fn api_routes(rate_limit: Option<RateLimitLayer>) -> Router<AppState> {
    let links = Router::new().route("/links", post(create_link_handler));
    let links = match rate_limit {
        Some(layer) => links.layer(layer),
        None => links,
    };

    Router::new()
        .merge(links)
        .route("/healthz", get(health_handler))
}
