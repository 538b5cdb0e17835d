pub mod memory_cache;
pub mod noop_cache;
pub mod redis_cache;

pub use memory_cache::InMemoryCache;
pub use noop_cache::NoOpCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use common::metrics::{self, CacheOutcome};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::ReadModelError;

/// Expiration applied to every cached query response unless configured otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// String-keyed store with per-key expiration
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError>;

    async fn remove(&self, key: &str) -> Result<(), ReadModelError>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<(), ReadModelError> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}

/// Typed, fail-open front of a [`CacheBackend`].
///
/// Values are stored as JSON. Every failure (backend unreachable, undecodable
/// payload, cancelled call) is logged and reported to the caller as a miss or
/// a no-op, never as an error.
#[derive(Clone)]
pub struct CacheGateway {
    backend: Arc<dyn CacheBackend>,
    default_ttl: Duration,
}

impl CacheGateway {
    pub fn new(backend: Arc<dyn CacheBackend>, default_ttl: Duration) -> Self {
        Self {
            backend,
            default_ttl,
        }
    }

    /// Gateway that never stores anything
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoOpCache::new()), DEFAULT_TTL)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str, cancel: &CancellationToken) -> Option<T> {
        let lookup = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Cache lookup cancelled for key: {}", key);
                self.record(CacheOutcome::Error);
                return None;
            }
            result = self.backend.get(key) => result,
        };

        match lookup {
            Ok(Some(value)) => match serde_json::from_str::<T>(&value) {
                Ok(data) => {
                    debug!("Cache hit for key: {}", key);
                    self.record(CacheOutcome::Hit);
                    Some(data)
                }
                Err(e) => {
                    warn!("Failed to deserialize cached value for {}: {}", key, e);
                    self.record(CacheOutcome::Error);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key: {}", key);
                self.record(CacheOutcome::Miss);
                None
            }
            Err(e) => {
                error!("Cache read failed for key {}: {}", key, e);
                self.record(CacheOutcome::Error);
                None
            }
        }
    }

    /// Set value in cache with the gateway's default TTL
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, cancel: &CancellationToken) {
        self.set_with_ttl(key, value, self.default_ttl, cancel).await;
    }

    /// Set value in cache, expiring `ttl` after this call
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
        cancel: &CancellationToken,
    ) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize value for cache key {}: {}", key, e);
                self.record(CacheOutcome::Error);
                return;
            }
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Cache write cancelled for key: {}", key);
                return;
            }
            result = self.backend.set(key, &json, ttl) => result,
        };

        match result {
            Ok(()) => {
                debug!("Cached value for key: {} with TTL: {}s", key, ttl.as_secs());
            }
            Err(e) => {
                error!("Failed to set cache for key {}: {}", key, e);
                self.record(CacheOutcome::Error);
            }
        }
    }

    /// Delete value from cache
    pub async fn remove(&self, key: &str, cancel: &CancellationToken) {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Cache removal cancelled for key: {}", key);
                return;
            }
            result = self.backend.remove(key) => result,
        };

        match result {
            Ok(()) => debug!("Deleted cache for key: {}", key),
            Err(e) => {
                error!("Failed to delete cache for key {}: {}", key, e);
                self.record(CacheOutcome::Error);
            }
        }
    }

    /// Check if cache is available (health check)
    pub async fn health_check(&self) -> Result<(), ReadModelError> {
        self.backend.health_check().await
    }

    fn record(&self, outcome: CacheOutcome) {
        metrics::record_cache_request(self.backend.name(), outcome);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend whose every call fails
    #[derive(Default)]
    pub struct FailingCache {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl CacheBackend for FailingCache {
        async fn get(&self, _key: &str) -> Result<Option<String>, ReadModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ReadModelError::CacheError("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), ReadModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ReadModelError::CacheError("connection refused".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), ReadModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ReadModelError::CacheError("connection refused".to_string()))
        }

        async fn health_check(&self) -> Result<(), ReadModelError> {
            Err(ReadModelError::CacheError("connection refused".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// In-memory backend that remembers every write it receives
    #[derive(Default)]
    pub struct RecordingCache {
        pub entries: Mutex<Vec<(String, String, Duration)>>,
    }

    impl RecordingCache {
        pub fn writes(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        pub fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), DEFAULT_TTL));
        }
    }

    #[async_trait]
    impl CacheBackend for RecordingCache {
        async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(k, _, _)| k == key)
                .map(|(_, v, _)| v.clone()))
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError> {
            self.entries
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), ttl));
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), ReadModelError> {
            self.entries.lock().unwrap().retain(|(k, _, _)| k != key);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }
}
