use async_trait::async_trait;
use std::time::Duration;

use super::CacheBackend;
use crate::ReadModelError;

/// Cache store that never keeps anything: reads miss, writes succeed
#[derive(Debug, Clone, Default)]
pub struct NoOpCache;

impl NoOpCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NoOpCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, ReadModelError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), ReadModelError> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<(), ReadModelError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_get_after_set_misses() {
        let cache = NoOpCache::new();
        tokio_test::assert_ok!(cache.set("key", "value", Duration::from_secs(60)).await);
        assert_eq!(tokio_test::assert_ok!(cache.get("key").await), None);
        tokio_test::assert_ok!(cache.remove("key").await);
        tokio_test::assert_ok!(cache.health_check().await);
    }
}
