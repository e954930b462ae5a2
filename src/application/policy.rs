//! Per-app policy checks applied during link creation.

use tracing::warn;

use crate::domain::entities::AppConfig;
use crate::error::AppError;

/// Picks the domain a new link is scoped under.
///
/// A requested domain must be one of the app's allowed domains. Without a
/// request the app's first allowed domain is used. The result is lowercased
/// to match the `Host` lookup on redirect.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] if the requested domain is not allowed or
/// the app has no allowed domains at all.
pub fn resolve_domain(app: &AppConfig, requested: Option<&str>) -> Result<String, AppError> {
    match requested {
        Some(domain) if app.allows_domain(domain) => Ok(domain.to_ascii_lowercase()),
        Some(domain) => {
            warn!(app = app.display_name(), domain, "Domain not allowed for app");
            Err(AppError::forbidden("Domain not allowed for this app"))
        }
        None => match app.default_domain() {
            Some(domain) => Ok(domain.to_ascii_lowercase()),
            None => {
                warn!(app = app.display_name(), "App has no allowed domains");
                Err(AppError::forbidden("No allowed domains for this app"))
            }
        },
    }
}

/// Checks the requested TTL against the app's inclusive bounds.
///
/// A bound of `0` is not enforced.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] naming the violated bound.
pub fn check_ttl(app: &AppConfig, ttl: u64) -> Result<(), AppError> {
    if app.max_duration_sec != 0 && ttl > app.max_duration_sec {
        return Err(AppError::bad_request(format!(
            "TTL too high, max is {}",
            app.max_duration_sec
        )));
    }

    if app.min_duration_sec != 0 && ttl < app.min_duration_sec {
        return Err(AppError::bad_request(format!(
            "TTL too low, min is {}",
            app.min_duration_sec
        )));
    }

    Ok(())
}
