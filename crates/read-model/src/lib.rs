pub mod cache;
pub mod queries;
pub mod repositories;

pub use cache::{CacheBackend, CacheGateway, InMemoryCache, NoOpCache, RedisCache};
pub use repositories::{
    CustomerReadOnlyRepository, OrderReadOnlyRepository, PostgresCustomerRepository,
    PostgresOrderRepository,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadModelError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Request cancelled before the query completed")]
    Cancelled,
}

impl ReadModelError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
