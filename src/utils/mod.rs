//! Helpers used across the application:
//!
//! - [`slug`] - Slug generation and the reserved-slug blacklist
//! - [`host`] - Domain extraction from the `Host` header

pub mod host;
pub mod slug;
