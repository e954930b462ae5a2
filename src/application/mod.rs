//! Application layer: per-app policy and the services built on it.
//!
//! Services consume the [`LinkRepository`](crate::domain::repositories::LinkRepository)
//! trait and return [`AppError`](crate::error::AppError) so HTTP handlers stay
//! thin adapters.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution and store health
//! - [`services::auth_service::AuthService`] - API key → app resolution
//!
//! [`policy`] holds the domain and TTL rules applied during creation.

pub mod policy;
pub mod services;
