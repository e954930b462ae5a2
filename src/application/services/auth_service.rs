//! App (tenant) resolution from API keys.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{AppConfig, AppsConfig};
use crate::error::AppError;
use tracing::debug;

/// Resolves the calling app from the `X-API-Key` header value.
///
/// Built once from the loaded [`AppsConfig`] and read-only afterwards, so a
/// single instance is shared by all requests without locking.
pub struct AuthService {
    public: Option<Arc<AppConfig>>,
    by_api_key: HashMap<String, Arc<AppConfig>>,
}

impl AuthService {
    /// Builds the API-key index.
    ///
    /// Expects a config that already passed [`crate::config::validate_apps`];
    /// on duplicate keys the later app wins.
    pub fn new(config: AppsConfig) -> Self {
        let by_api_key = config
            .apps
            .into_iter()
            .map(|app| (app.api_key.clone(), Arc::new(app)))
            .collect();

        Self {
            public: config.public.map(Arc::new),
            by_api_key,
        }
    }

    /// Returns the app allowed to act for this request.
    ///
    /// A missing or empty key selects the public app; any other key is looked
    /// up in the index.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when no app matches or the app is
    /// disabled. Both cases produce the same error so callers cannot tell
    /// which keys exist.
    pub fn authorize(&self, api_key: Option<&str>) -> Result<Arc<AppConfig>, AppError> {
        let app = match api_key.filter(|key| !key.is_empty()) {
            None => self.public.clone(),
            Some(key) => self.by_api_key.get(key).cloned(),
        };

        match app {
            Some(app) if app.enabled => {
                debug!(app = app.display_name(), "Request authorized");
                Ok(app)
            }
            Some(app) => {
                debug!(app = app.display_name(), "Rejected request for disabled app");
                Err(AppError::unauthorized("Invalid API key"))
            }
            None => {
                debug!(has_key = api_key.is_some(), "Rejected request with unknown API key");
                Err(AppError::unauthorized("Invalid API key"))
            }
        }
    }

    /// Number of keyed apps (the public app is not counted).
    pub fn app_count(&self) -> usize {
        self.by_api_key.len()
    }

    pub fn has_public_app(&self) -> bool {
        self.public.is_some()
    }
}
