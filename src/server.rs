//! HTTP server initialization and runtime setup.
//!
//! Loads the apps registry, connects the link store, and runs the Axum
//! server until Ctrl+C.

use crate::api::middleware::rate_limit;
use crate::application::services::AuthService;
use crate::config::{Config, load_apps, mask_connection_string};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, RedisLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Apps registry from the TOML file
/// - Link store (Redis, or in-memory when Redis is not configured)
/// - Per-IP rate limiter for link creation (if enabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The apps file is missing or invalid
/// - Redis is configured but unreachable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let apps = load_apps(&config.apps_config_path)?;
    let auth_service = AuthService::new(apps);
    tracing::info!(
        apps = auth_service.app_count(),
        public = auth_service.has_public_app(),
        "Apps loaded"
    );

    let repository = connect_store(&config).await?;

    let limiter = if config.rate_limit_enabled {
        let layer = rate_limit::layer(config.rate_limit_per_second, config.rate_limit_burst)
            .context("Invalid rate limit settings")?;
        Some(layer)
    } else {
        None
    };

    let state = AppState::new(repository, auth_service);
    let app = app_router(state, limiter);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the link store selected by the configuration.
///
/// # Errors
///
/// Returns an error if Redis is configured but the connection or the initial
/// PING fails. There is no silent fallback to memory in that case.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match &config.redis_url {
        Some(redis_url) => {
            let repository = RedisLinkRepository::connect(redis_url)
                .await
                .with_context(|| {
                    format!(
                        "Failed to connect to Redis at {}",
                        mask_connection_string(redis_url)
                    )
                })?;
            tracing::info!("Store: Redis connected");
            Ok(Arc::new(repository))
        }
        None => {
            tracing::warn!("Redis not configured, links are kept in memory and lost on restart");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
