//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host::domain_from_headers;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// The link is looked up under the request's `Host` (port stripped), so the
/// same slug can point to different URLs on different domains.
///
/// # Errors
///
/// Returns 400 Bad Request if the Host header is missing or invalid.
/// Returns 404 Not Found if no link exists or it has expired.
/// Returns 500 on store errors or when the stored URL is not a valid
/// `Location` header value.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let domain = domain_from_headers(&headers)?;

    let original_url = state.link_service.resolve(&domain, &slug).await?;

    let location = HeaderValue::try_from(original_url).map_err(|e| {
        error!(
            domain = %domain,
            slug = %slug,
            error = %e,
            "Stored URL is not a valid Location header"
        );
        AppError::internal("Something went wrong")
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
