//! Process-local cache store, used when no Redis instance is configured.
//!
//! Entries carry their own absolute expiry so that each `set` honours the TTL
//! it was given. Expired entries are treated as absent and evicted on read.

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::CacheBackend;
use crate::ReadModelError;

#[derive(Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache store backed by moka
#[derive(Clone)]
pub struct InMemoryCache {
    entries: Cache<String, Entry>,
}

impl InMemoryCache {
    pub fn new(max_capacity: u64) -> Self {
        let entries = Cache::builder().max_capacity(max_capacity).build();

        debug!(max_capacity = max_capacity, "In-memory cache created");
        Self { entries }
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError> {
        match self.entries.get(key).await {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value)),
            Some(_) => {
                self.entries.invalidate(key).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ReadModelError> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
