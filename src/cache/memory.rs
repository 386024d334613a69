use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use super::{Cache, CacheError};

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Thread-safe in-memory cache with per-entry TTL.
///
/// Expired entries are dropped lazily on read; `cleanup_expired` sweeps the
/// rest when somebody cares.
#[derive(Clone, Default)]
pub struct InMemoryCache {
    storage: Arc<DashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drop all expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.storage.len();
        self.storage.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.storage.len())
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            drop(entry);
            self.storage.remove(key);
            debug!("Cache entry {} expired, removed", key);
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
        self.storage.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
