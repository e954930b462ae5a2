//! Request extractors shared by API handlers.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::Validate;

use crate::error::AppError;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Raw value of the `X-API-Key` header, if present and valid UTF-8.
///
/// Extraction never fails; an absent key selects the public app, which is
/// decided later by [`AuthService`](crate::application::services::AuthService).
#[derive(Debug, Clone, Default)]
pub struct ApiKey(pub Option<String>);

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(Self(key))
    }
}

impl ApiKey {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// JSON body that has been deserialized and validated.
///
/// # Errors
///
/// - `400 BAD_REQUEST` "Invalid payload" when the body is not JSON of the
///   expected shape (syntax, types, content type)
/// - `422 VALIDATION_ERROR` with the full list of violated field rules
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!(reason = %rejection.body_text(), "Rejected malformed payload");
                AppError::bad_request("Invalid payload")
            })?;

        if let Err(errors) = value.validate() {
            let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
            fields.sort();
            warn!(fields = ?fields, "Rejected payload failing validation");
            return Err(errors.into());
        }

        Ok(Self(value))
    }
}
