//! Redis-backed link store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::entities::LinkKey;
use crate::domain::repositories::{KeyTtl, LinkRepository, StoreError};

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

/// Link store on top of Redis (or any Redis-protocol server such as Valkey).
///
/// Uses `ConnectionManager` for automatic reconnection; each call is a single
/// round-trip with no application-level retry.
#[derive(Clone)]
pub struct RedisLinkRepository {
    conn: ConnectionManager,
}

impl RedisLinkRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let repository = Self { conn };
        repository
            .ping()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(repository)
    }
}

#[async_trait]
impl LinkRepository for RedisLinkRepository {
    async fn get(&self, key: &LinkKey) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value = conn.get::<_, Option<String>>(key.to_string()).await?;

        debug!(key = %key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set_if_absent(
        &self,
        key: &LinkKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key.to_string()).arg(value).arg("NX");
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs());
        }

        let mut conn = self.conn.clone();
        // SET ... NX replies OK when written and nil when the key exists.
        let reply: Option<String> = cmd.query_async(&mut conn).await?;

        debug!(key = %key, written = reply.is_some(), "Redis SET NX");
        Ok(reply.is_some())
    }

    async fn ttl(&self, key: &LinkKey) -> Result<KeyTtl, StoreError> {
        let mut conn = self.conn.clone();
        let seconds = conn.ttl::<_, i64>(key.to_string()).await?;

        Ok(match seconds {
            -1 => KeyTtl::Persistent,
            s if s >= 0 => KeyTtl::Expires(Duration::from_secs(s as u64)),
            _ => KeyTtl::Missing,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await?;
        Ok(())
    }
}
