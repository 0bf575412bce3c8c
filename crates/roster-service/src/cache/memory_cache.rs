//! In-process cache.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::RosterResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Map-backed cache with optional per-entry expiry.
///
/// Process-local stand-in for Redis in tests. Deployments with Redis
/// disabled get [`RedisCacheService::disabled`](super::RedisCacheService::disabled) instead.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true when no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RosterResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn exists(&self, key: &str) -> RosterResult<bool> {
        let now = Instant::now();
        Ok(self.entries.read().get(key).is_some_and(|e| e.is_live(now)))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_exists_delete() {
        let cache = InMemoryCache::new();
        assert!(cache.get_raw("1").await.unwrap().is_none());
        assert!(!cache.exists("1").await.unwrap());

        cache.set_raw("1", "{}", None).await.unwrap();
        assert_eq!(cache.get_raw("1").await.unwrap().as_deref(), Some("{}"));
        assert!(cache.exists("1").await.unwrap());
        assert_eq!(cache.len(), 1);

        assert!(cache.delete("1").await.unwrap());
        assert!(!cache.delete("1").await.unwrap());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache.set_raw("1", "{}", Some(Duration::ZERO)).await.unwrap();

        assert!(cache.get_raw("1").await.unwrap().is_none());
        assert!(!cache.exists("1").await.unwrap());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = InMemoryCache::new();
        cache.set_raw("1", "a", None).await.unwrap();
        cache.set_raw("1", "b", None).await.unwrap();
        assert_eq!(cache.get_raw("1").await.unwrap().as_deref(), Some("b"));
    }
}
