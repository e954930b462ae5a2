//! In-process link store for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::domain::entities::LinkKey;
use crate::domain::repositories::{KeyTtl, LinkRepository, StoreError};

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}

/// Writes between two sweeps of expired entries.
const SWEEP_INTERVAL: usize = 1024;

/// Link store backed by a `DashMap`.
///
/// Expired entries are evicted on access, and every [`SWEEP_INTERVAL`] writes
/// a sweep drops expired entries nobody read. `set_if_absent` goes through
/// the map's entry API, which holds the shard lock for the whole
/// check-and-insert, so concurrent writers on one key have a single winner.
///
/// Data is lost on restart; this backend is meant for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    entries: DashMap<String, StoredValue>,
    writes: AtomicUsize,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, stored| !stored.is_expired());
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn get(&self, key: &LinkKey) -> Result<Option<String>, StoreError> {
        let key = key.to_string();

        let value = self
            .entries
            .get(&key)
            .and_then(|entry| (!entry.is_expired()).then(|| entry.value.clone()));

        if value.is_none() {
            self.entries.remove_if(&key, |_, stored| stored.is_expired());
        }

        Ok(value)
    }

    async fn set_if_absent(
        &self,
        key: &LinkKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        // Must run before `entry()` below: retain locks every shard.
        if self.writes.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.purge_expired();
        }

        let stored = StoredValue {
            value: value.to_owned(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(stored);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(stored);
                Ok(true)
            }
        }
    }

    async fn ttl(&self, key: &LinkKey) -> Result<KeyTtl, StoreError> {
        let Some(entry) = self.entries.get(&key.to_string()) else {
            return Ok(KeyTtl::Missing);
        };

        if entry.is_expired() {
            return Ok(KeyTtl::Missing);
        }

        Ok(match entry.expires_at {
            None => KeyTtl::Persistent,
            Some(expires_at) => {
                // Round to the nearest second like Redis does.
                let remaining = expires_at.saturating_duration_since(Instant::now());
                let seconds = (remaining.as_millis() + 500) / 1000;
                KeyTtl::Expires(Duration::from_secs(seconds as u64))
            }
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(slug: &str) -> LinkKey {
        LinkKey::new("localhost", slug)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let repo = MemoryLinkRepository::new();

        let written = repo
            .set_if_absent(&key("abc"), "https://example.com", None)
            .await
            .unwrap();

        assert!(written);
        assert_eq!(
            repo.get(&key("abc")).await.unwrap(),
            Some("https://example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_if_absent_keeps_first_value() {
        let repo = MemoryLinkRepository::new();

        assert!(
            repo.set_if_absent(&key("abc"), "https://first.com", None)
                .await
                .unwrap()
        );
        assert!(
            !repo
                .set_if_absent(&key("abc"), "https://second.com", None)
                .await
                .unwrap()
        );

        assert_eq!(
            repo.get(&key("abc")).await.unwrap(),
            Some("https://first.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_same_slug_on_other_domain_is_independent() {
        let repo = MemoryLinkRepository::new();

        let a = LinkKey::new("a.com", "promo");
        let b = LinkKey::new("b.com", "promo");

        assert!(repo.set_if_absent(&a, "https://a.com/x", None).await.unwrap());
        assert!(repo.set_if_absent(&b, "https://b.com/x", None).await.unwrap());
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_ttl_reports_persistent_and_expiring() {
        let repo = MemoryLinkRepository::new();

        repo.set_if_absent(&key("forever"), "https://example.com", None)
            .await
            .unwrap();
        repo.set_if_absent(
            &key("short"),
            "https://example.com",
            Some(Duration::from_secs(23)),
        )
        .await
        .unwrap();

        assert_eq!(repo.ttl(&key("forever")).await.unwrap(), KeyTtl::Persistent);
        assert_eq!(
            repo.ttl(&key("short")).await.unwrap(),
            KeyTtl::Expires(Duration::from_secs(23))
        );
        assert_eq!(repo.ttl(&key("missing")).await.unwrap(), KeyTtl::Missing);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone_and_reusable() {
        let repo = MemoryLinkRepository::new();

        repo.set_if_absent(
            &key("brief"),
            "https://old.com",
            Some(Duration::from_millis(20)),
        )
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(repo.get(&key("brief")).await.unwrap(), None);
        assert_eq!(repo.ttl(&key("brief")).await.unwrap(), KeyTtl::Missing);
        assert!(
            repo.set_if_absent(&key("brief"), "https://new.com", None)
                .await
                .unwrap()
        );
        assert!(!repo.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired_drops_unread_entries() {
        let repo = MemoryLinkRepository::new();

        repo.set_if_absent(&key("keep"), "https://keep.com", None)
            .await
            .unwrap();
        for i in 0..3 {
            repo.set_if_absent(
                &key(&format!("old{i}")),
                "https://old.com",
                Some(Duration::from_millis(10)),
            )
            .await
            .unwrap();
        }

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(repo.entries.len(), 4);
        assert_eq!(repo.purge_expired(), 3);
        assert_eq!(repo.entries.len(), 1);
        assert!(repo.get(&key("keep")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_writes_trigger_periodic_sweep() {
        let repo = MemoryLinkRepository::new();

        repo.set_if_absent(&key("stale"), "https://old.com", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        for i in 1..SWEEP_INTERVAL {
            repo.set_if_absent(&key(&format!("fresh{i}")), "https://new.com", None)
                .await
                .unwrap();
        }

        assert!(!repo.entries.contains_key(&key("stale").to_string()));
        assert_eq!(repo.entries.len(), SWEEP_INTERVAL - 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_set_if_absent_has_single_winner() {
        let repo = Arc::new(MemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.set_if_absent(&key("race"), &format!("https://{i}.com"), None)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }
}
