//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports whether the store is reachable.
///
/// # Endpoint
///
/// `GET /api/v1/healthz`
///
/// # Response Codes
///
/// - **200 OK**: `{"store_ok": true}`
/// - **500 Internal Server Error**: `{"store_ok": false}`
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.link_service.store_healthy().await;

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { store_ok }))
}
