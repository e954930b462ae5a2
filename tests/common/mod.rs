#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use linkgate::application::services::AuthService;
use linkgate::domain::entities::{AppConfig, AppsConfig, LinkKey};
use linkgate::domain::repositories::{KeyTtl, LinkRepository, StoreError};
use linkgate::infrastructure::persistence::MemoryLinkRepository;
use linkgate::routes::router;
use linkgate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const MARKETING_KEY: &str = "key-marketing";
pub const LEGACY_KEY: &str = "key-legacy";

/// Public app on `localhost`, an enabled keyed app with two domains and TTL
/// bounds, and a disabled keyed app.
pub fn test_apps() -> AppsConfig {
    AppsConfig {
        public: Some(AppConfig {
            enabled: true,
            allowed_domains: vec!["localhost".to_string()],
            ..Default::default()
        }),
        apps: vec![
            AppConfig {
                name: "marketing".to_string(),
                enabled: true,
                api_key: MARKETING_KEY.to_string(),
                allowed_domains: vec!["a.com".to_string(), "b.com".to_string()],
                min_duration_sec: 60,
                max_duration_sec: 3600,
            },
            AppConfig {
                name: "legacy".to_string(),
                enabled: false,
                api_key: LEGACY_KEY.to_string(),
                allowed_domains: vec!["a.com".to_string()],
                ..Default::default()
            },
        ],
    }
}

pub fn create_test_state(apps: AppsConfig, repository: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(repository, AuthService::new(apps))
}

/// Full router (without rate limiting) over a fresh in-memory store.
pub fn test_server_with(apps: AppsConfig) -> (TestServer, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = create_test_state(apps, repository.clone());

    let server = TestServer::new(router(state, None)).unwrap();
    (server, repository)
}

pub fn test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    test_server_with(test_apps())
}

pub async fn stored_url(
    repository: &MemoryLinkRepository,
    domain: &str,
    slug: &str,
) -> Option<String> {
    repository.get(&LinkKey::new(domain, slug)).await.unwrap()
}

pub async fn stored_ttl(repository: &MemoryLinkRepository, domain: &str, slug: &str) -> KeyTtl {
    repository.ttl(&LinkKey::new(domain, slug)).await.unwrap()
}

/// Store whose every operation fails as if the connection was lost.
pub struct UnavailableStore;

#[async_trait]
impl LinkRepository for UnavailableStore {
    async fn get(&self, _key: &LinkKey) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set_if_absent(
        &self,
        _key: &LinkKey,
        _url: &str,
        _ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ttl(&self, _key: &LinkKey) -> Result<KeyTtl, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }
}

pub fn unavailable_server() -> TestServer {
    let state = create_test_state(test_apps(), Arc::new(UnavailableStore));
    TestServer::new(router(state, None)).unwrap()
}
