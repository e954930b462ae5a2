//! Handler for link creation.

use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::extractors::{ApiKey, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// # Request
///
/// Optional `X-API-Key` header selects the app; without it the public app is
/// used.
///
/// ```json
/// {
///   "slug": "promo",             // optional, generated when absent
///   "domain": "go.example.com",  // optional, app default when absent
///   "original_url": "https://example.com/landing",
///   "ttl": 3600                  // seconds, 0 = never expires
/// }
/// ```
///
/// # Response
///
/// `201 Created` with [`LinkResponse`].
///
/// # Errors
///
/// - 400 malformed body or TTL outside the app's bounds
/// - 401 unknown key, disabled app, or no public app
/// - 403 domain not allowed or slug blacklisted
/// - 409 slug already taken on this domain
/// - 422 field validation failed
/// - 500 store failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    api_key: ApiKey,
    ValidatedJson(payload): ValidatedJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let app = state
        .auth_service
        .authorize(api_key.as_deref())
        .inspect_err(|_| {
            warn!(
                domain = payload.domain.as_deref().unwrap_or_default(),
                slug = payload.slug.as_deref().unwrap_or_default(),
                "Unauthorized link creation"
            );
        })?;

    let new_link = payload
        .into_new_link()
        .ok_or_else(|| AppError::bad_request("Invalid payload"))?;

    let link = state.link_service.create_link(&app, new_link).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}
