//! Domain extraction from the `Host` request header.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Extracts the link domain from the `Host` header.
///
/// The port is stripped (`example.com:3000` → `example.com`); bracketed IPv6
/// literals keep their brackets (`[::1]:8080` → `[::1]`). Host names are
/// case-insensitive, so the result is lowercased.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if the header is missing, not valid
/// ASCII, or empty.
pub fn domain_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header"))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header"))?;

    let domain = strip_port(host.trim());
    if domain.is_empty() {
        return Err(AppError::bad_request("Invalid Host header"));
    }

    Ok(domain.to_ascii_lowercase())
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    host.split_once(':').map_or(host, |(name, _port)| name)
}
