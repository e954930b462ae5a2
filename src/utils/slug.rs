//! Slug generation and the reserved-slug blacklist.

use base64::Engine as _;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Random bytes per generated slug. 6 bytes encode to exactly 8 base64 characters.
const SLUG_BYTES: usize = 6;

/// Length of a generated slug.
pub const GENERATED_SLUG_LENGTH: usize = 8;

/// Slugs that can never be used for a link, whether supplied or generated.
///
/// They collide with API paths or well-known files served on the same host.
static BLACKLIST: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "api",
        "links",
        "admin",
        "robots.txt",
        "healthz",
        "favicon.ico",
    ])
});

/// Generates a random URL-safe slug of [`GENERATED_SLUG_LENGTH`] characters.
///
/// Uses `getrandom` for entropy and encodes with URL-safe base64 without
/// padding, so the alphabet is `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns the underlying error if the system random number generator fails.
pub fn generate_slug() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SLUG_BYTES];
    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `slug` is reserved.
pub fn is_blacklisted(slug: &str) -> bool {
    BLACKLIST.contains(slug)
}
