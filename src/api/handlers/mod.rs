//! HTTP request handlers for API endpoints.
//!
//! Handlers only extract, delegate to a service and wrap the result; all
//! failures leave through [`AppError`](crate::error::AppError).

pub mod health;
pub mod links;
pub mod redirect;

pub use health::health_handler;
pub use links::create_link_handler;
pub use redirect::redirect_handler;
