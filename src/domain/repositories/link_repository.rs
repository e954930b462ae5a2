//! Repository trait for link storage on an expiring key-value store.

use crate::domain::entities::LinkKey;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a link store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command error: {0}")]
    Command(String),
}

/// Remaining lifetime of a stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (or already expired).
    Missing,
    /// The key exists and never expires.
    Persistent,
    /// The key expires after the given duration.
    Expires(Duration),
}

/// Repository interface over an atomic, expiring key-value store.
///
/// All coordination between concurrent requests is delegated to the store:
/// [`LinkRepository::set_if_absent`] must be atomic so that, of several
/// writers racing on the same key, exactly one wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisLinkRepository`] - Redis implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process map for
///   development and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Reads the original URL stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the key exists
    /// - `Ok(None)` if it does not (or expired)
    async fn get(&self, key: &LinkKey) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key` only if the key is absent.
    ///
    /// `ttl = None` stores the value without expiry.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the value was written
    /// - `Ok(false)` if the key already existed and nothing was written
    async fn set_if_absent(
        &self,
        key: &LinkKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError>;

    /// Reports the remaining lifetime of `key`.
    async fn ttl(&self, key: &LinkKey) -> Result<KeyTtl, StoreError>;

    /// Checks store connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}
