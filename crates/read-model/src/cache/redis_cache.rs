use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use std::time::Duration;
use tracing::info;

use super::CacheBackend;
use crate::ReadModelError;

/// Redis-backed cache store
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Create new Redis cache
    pub async fn new(redis_url: &str) -> Result<Self, ReadModelError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| ReadModelError::CacheError(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| ReadModelError::CacheError(format!("Failed to connect to Redis: {}", e)))?;

        info!("Redis cache initialized");
        Ok(Self { conn })
    }

    /// Check if cache is available
    pub async fn ping(&self) -> Result<(), ReadModelError> {
        let result: Result<String, RedisError> = redis::cmd("PING")
            .query_async(&mut self.conn.clone())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(ReadModelError::CacheError(format!("Redis ping failed: {}", e))),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ReadModelError> {
        self.conn
            .clone()
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| ReadModelError::CacheError(format!("Redis GET failed: {}", e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), ReadModelError> {
        // SET EX rejects a zero expiry
        let ttl_seconds = ttl.as_secs().max(1);

        let result: Result<(), RedisError> = self
            .conn
            .clone()
            .set_ex(key, value, ttl_seconds)
            .await;

        result.map_err(|e| ReadModelError::CacheError(format!("Redis SETEX failed: {}", e)))
    }

    async fn remove(&self, key: &str) -> Result<(), ReadModelError> {
        let result: Result<(), RedisError> = self.conn.clone().del(key).await;

        result.map_err(|e| ReadModelError::CacheError(format!("Redis DEL failed: {}", e)))
    }

    async fn health_check(&self) -> Result<(), ReadModelError> {
        self.ping().await
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
