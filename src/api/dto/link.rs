//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use url::Url;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Link, NewLink};

/// Longest TTL a client may request: one year.
pub const MAX_TTL_SECS: i64 = 31_536_000;

/// Request body for `POST /api/v1/links`.
///
/// Empty strings for `slug` and `domain` are treated as absent. `original_url`
/// and `ttl` are `Option` only so that a missing field is reported as a
/// validation error rather than a malformed payload.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Custom slug; generated when absent.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        length(min = 3, max = 20, message = "must be between 3 and 20 characters"),
        does_not_contain(pattern = "/", message = "must not contain '/'")
    )]
    pub slug: Option<String>,

    /// Target domain; the app's default domain when absent.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub domain: Option<String>,

    #[validate(
        required(message = "is required"),
        custom(function = "validate_http_url", message = "must be an absolute http(s) URL")
    )]
    pub original_url: Option<String>,

    /// Lifetime in seconds, `0` for no expiry.
    #[validate(
        required(message = "is required"),
        range(min = 0, max = MAX_TTL_SECS, message = "must be between 0 and 31536000")
    )]
    pub ttl: Option<i64>,
}

impl CreateLinkRequest {
    /// Converts a validated request into the service input.
    ///
    /// Returns `None` if a required field is missing, which cannot happen
    /// after [`Validate::validate`] succeeded.
    pub fn into_new_link(self) -> Option<NewLink> {
        let ttl = u64::try_from(self.ttl?).ok()?;

        Some(NewLink {
            slug: self.slug,
            domain: self.domain,
            original_url: self.original_url?,
            ttl,
        })
    }
}

/// Accepts absolute http(s) URLs with a host.
///
/// The raw value is stored and later sent back as a `Location` header, so it
/// must not contain control characters; `Url::parse` would silently drop tabs
/// and newlines and accept it anyway.
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("http_url"));
    }

    let url = Url::parse(value).map_err(|_| ValidationError::new("http_url"))?;

    let http = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());

    if http && has_host {
        Ok(())
    } else {
        Err(ValidationError::new("http_url"))
    }
}

/// A created link.
///
/// ```json
/// {
///   "slug": "Xk3_a9Qz",
///   "domain": "localhost",
///   "original_url": "http://google.com",
///   "url": "https://localhost/Xk3_a9Qz",
///   "ttl": 23
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub slug: String,
    pub domain: String,
    pub original_url: String,
    pub url: String,
    pub ttl: u64,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            url: link.url(),
            slug: link.slug,
            domain: link.domain,
            original_url: link.original_url,
            ttl: link.ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CreateLinkRequest {
        serde_json::from_value(value).unwrap()
    }

    fn invalid_fields(request: &CreateLinkRequest) -> Vec<String> {
        let mut fields: Vec<String> = request
            .validate()
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn test_minimal_request_is_valid() {
        let request = parse(json!({ "original_url": "http://google.com", "ttl": 23 }));
        assert!(request.validate().is_ok());

        let new_link = request.into_new_link().unwrap();
        assert_eq!(new_link.slug, None);
        assert_eq!(new_link.domain, None);
        assert_eq!(new_link.ttl, 23);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let request = parse(json!({
            "slug": "",
            "domain": "",
            "original_url": "https://example.com",
            "ttl": 0
        }));

        assert!(request.validate().is_ok());
        assert_eq!(request.slug, None);
        assert_eq!(request.domain, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let request = parse(json!({}));
        assert_eq!(invalid_fields(&request), ["original_url", "ttl"]);
    }

    #[test]
    fn test_slug_rules() {
        for slug in ["ab", "a/b/c", "this-slug-is-way-too-long"] {
            let request = parse(json!({
                "slug": slug,
                "original_url": "https://example.com",
                "ttl": 0
            }));
            assert_eq!(invalid_fields(&request), ["slug"], "slug {slug}");
        }
    }

    #[test]
    fn test_original_url_must_be_http_with_host() {
        for url in ["not a url", "ftp://example.com", "mailto:a@b.com", "/relative"] {
            let request = parse(json!({ "original_url": url, "ttl": 0 }));
            assert_eq!(invalid_fields(&request), ["original_url"], "url {url}");
        }
    }

    #[test]
    fn test_original_url_rejects_control_characters() {
        for url in [
            "https://example.com/a\nb",
            "https://example.com/\ta",
            "https://exa\rmple.com",
        ] {
            let request = parse(json!({ "original_url": url, "ttl": 0 }));
            assert_eq!(invalid_fields(&request), ["original_url"], "url {url:?}");
        }

        let request = parse(json!({
            "original_url": "https://example.com/caf\u{e9}?q=a b",
            "ttl": 0
        }));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_ttl_range() {
        for ttl in [-1, MAX_TTL_SECS + 1] {
            let request = parse(json!({ "original_url": "https://example.com", "ttl": ttl }));
            assert_eq!(invalid_fields(&request), ["ttl"], "ttl {ttl}");
        }

        let max = parse(json!({ "original_url": "https://example.com", "ttl": MAX_TTL_SECS }));
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_wrong_json_types_fail_deserialization() {
        let result =
            serde_json::from_value::<CreateLinkRequest>(json!({ "original_url": 1, "ttl": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_link_response_includes_url() {
        let response = LinkResponse::from(Link {
            slug: "promo".to_string(),
            domain: "a.com".to_string(),
            original_url: "https://example.com".to_string(),
            ttl: 0,
        });

        assert_eq!(response.url, "https://a.com/promo");
    }
}
