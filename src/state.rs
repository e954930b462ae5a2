//! Shared application state passed to handlers via axum `State`.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::repositories::LinkRepository;

/// Services shared by all requests.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn LinkRepository>, auth_service: AuthService) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            auth_service: Arc::new(auth_service),
        }
    }
}
