use anyhow::Result;
use common::config::{AppConfig, CacheConfig};
use read_model::queries::{
    GetBestCustomersHandler, GetOrderByIdHandler, GetOrderListHandler, GetOrdersByCustomerHandler,
    GetRevenueByCustomerHandler, GetRevenueByPeriodHandler,
};
use read_model::{
    CacheBackend, CacheGateway, CustomerReadOnlyRepository, InMemoryCache, NoOpCache,
    OrderReadOnlyRepository, PostgresCustomerRepository, PostgresOrderRepository, RedisCache,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub order_by_id: Arc<GetOrderByIdHandler>,
    pub order_list: Arc<GetOrderListHandler>,
    pub orders_by_customer: Arc<GetOrdersByCustomerHandler>,
    pub best_customers: Arc<GetBestCustomersHandler>,
    pub revenue_by_customer: Arc<GetRevenueByCustomerHandler>,
    pub revenue_by_period: Arc<GetRevenueByPeriodHandler>,
    pub cache: CacheGateway,
    pub request_timeout: Duration,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        // Connect to database
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url())
            .await?;
        tracing::info!("Database connected");

        let orders = Arc::new(PostgresOrderRepository::new(pool.clone())) as Arc<dyn OrderReadOnlyRepository>;
        let customers = Arc::new(PostgresCustomerRepository::new(pool)) as Arc<dyn CustomerReadOnlyRepository>;

        let cache = CacheGateway::new(cache_backend(&config.cache).await, config.cache.ttl());
        tracing::info!("Cache backend: {}", cache.backend_name());

        Ok(Self::from_parts(
            orders,
            customers,
            cache,
            config.server.request_timeout(),
        ))
    }

    pub fn from_parts(
        orders: Arc<dyn OrderReadOnlyRepository>,
        customers: Arc<dyn CustomerReadOnlyRepository>,
        cache: CacheGateway,
        request_timeout: Duration,
    ) -> Self {
        Self {
            order_by_id: Arc::new(GetOrderByIdHandler::new(orders.clone(), cache.clone())),
            order_list: Arc::new(GetOrderListHandler::new(orders.clone(), cache.clone())),
            orders_by_customer: Arc::new(GetOrdersByCustomerHandler::new(
                orders.clone(),
                cache.clone(),
            )),
            best_customers: Arc::new(GetBestCustomersHandler::new(orders.clone(), cache.clone())),
            revenue_by_customer: Arc::new(GetRevenueByCustomerHandler::new(
                orders.clone(),
                customers,
                cache.clone(),
            )),
            revenue_by_period: Arc::new(GetRevenueByPeriodHandler::new(orders, cache.clone())),
            cache,
            request_timeout,
        }
    }
}

/// Pick the cache store; an unreachable Redis degrades to the in-process cache
async fn cache_backend(config: &CacheConfig) -> Arc<dyn CacheBackend> {
    if !config.enabled {
        tracing::info!("Caching disabled");
        return Arc::new(NoOpCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        tracing::info!("Connecting to Redis...");
        match RedisCache::new(redis_url).await {
            Ok(redis) => {
                tracing::info!("Redis connected");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Redis unavailable, using in-memory cache: {}", e);
            }
        }
    }

    Arc::new(InMemoryCache::new(config.memory_capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_uses_noop_backend() {
        let config = CacheConfig {
            enabled: false,
            ..Default::default()
        };

        assert_eq!(cache_backend(&config).await.name(), "noop");
    }

    #[tokio::test]
    async fn test_no_redis_url_uses_memory_backend() {
        let config = CacheConfig::default();

        assert_eq!(cache_backend(&config).await.name(), "memory");
    }

    #[tokio::test]
    async fn test_bad_redis_url_falls_back_to_memory() {
        let config = CacheConfig {
            redis_url: Some("not-a-redis-url".to_string()),
            ..Default::default()
        };

        assert_eq!(cache_backend(&config).await.name(), "memory");
    }
}
