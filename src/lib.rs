//! # linkgate
//!
//! A multi-tenant URL shortener built with Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Links, app policy records and the store trait
//! - **Application Layer** ([`application`]) - Creation policy, auth and link services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, extractors and middleware
//!
//! ## Features
//!
//! - Per-app API keys with a keyless public app
//! - Per-app allowed domains and TTL bounds
//! - Custom or generated slugs, unique per domain
//! - Atomic create-if-absent writes with native store expiry
//! - Per-IP rate limiting and structured request tracing
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory otherwise
//! export APPS_CONFIG="apps.toml"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`],
//! apps from a TOML file via [`config::load_apps`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService};
    pub use crate::domain::entities::{AppConfig, AppsConfig, Link, LinkKey, NewLink};
    pub use crate::domain::repositories::{KeyTtl, LinkRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryLinkRepository;
    pub use crate::state::AppState;
}
