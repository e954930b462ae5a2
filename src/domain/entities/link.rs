//! Link entity representing a slug → URL mapping scoped to a domain.

use std::fmt;

/// A short link as created and returned by the service.
///
/// The pair (`domain`, `slug`) is the uniqueness scope: the same slug may
/// exist under different domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub slug: String,
    pub domain: String,
    pub original_url: String,
    /// Requested lifetime in seconds, `0` means the link never expires.
    pub ttl: u64,
}

impl Link {
    /// Fully-qualified short URL. Always HTTPS.
    pub fn url(&self) -> String {
        format!("https://{}/{}", self.domain, self.slug)
    }

    /// Storage key under which this link is persisted.
    pub fn key(&self) -> LinkKey {
        LinkKey::new(&self.domain, &self.slug)
    }
}

/// Input for creating a new link, after request validation.
///
/// `slug` and `domain` are optional: a missing slug is generated and a
/// missing domain is taken from the calling app's policy.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub original_url: String,
    pub ttl: u64,
}

/// Composite store key `link:{domain}/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    domain: String,
    slug: String,
}

impl LinkKey {
    pub fn new(domain: &str, slug: &str) -> Self {
        Self {
            domain: domain.to_owned(),
            slug: slug.to_owned(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link:{}/{}", self.domain, self.slug)
    }
}
