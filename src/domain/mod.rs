//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Policy that combines entities (tenant authorization, domain
//! resolution, TTL bounds) lives in [`crate::application`].

pub mod entities;
pub mod repositories;
