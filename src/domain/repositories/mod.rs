//! Repository trait definitions for the domain layer.
//!
//! The service does not own a persistence format: links live in an external
//! key-value store reached through [`LinkRepository`]. Implementations live in
//! `crate::infrastructure::persistence`; a mock is generated via `mockall`
//! for unit tests.

pub mod link_repository;

pub use link_repository::{KeyTtl, LinkRepository, StoreError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
