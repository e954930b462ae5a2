//! Core domain entities.
//!
//! - [`Link`] - A slug → URL mapping scoped to a domain
//! - [`LinkKey`] - The composite store key of a link
//! - [`AppConfig`] - Policy record of a calling application (tenant)
//!
//! Entities are plain data structures; policy lives in
//! [`crate::application`].

pub mod app;
pub mod link;

pub use app::{AppConfig, AppsConfig};
pub use link::{Link, LinkKey, NewLink};
