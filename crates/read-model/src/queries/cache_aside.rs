use common::metrics;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cache::CacheGateway;
use crate::ReadModelError;

/// Serve `cache_key` from the cache, or run `fetch` and cache what it returns.
///
/// `fetch` is only polled on a miss. Its error is returned as-is and nothing
/// is cached for it. Cancellation during `fetch` fails the query with
/// [`ReadModelError::Cancelled`]; cancellation during a cache call only costs
/// the cache.
pub async fn read_through<T, Fut>(
    cache: &CacheGateway,
    query_type: &'static str,
    cache_key: &str,
    cancel: &CancellationToken,
    fetch: Fut,
) -> Result<T, ReadModelError>
where
    T: Serialize + DeserializeOwned,
    Fut: Future<Output = Result<T, ReadModelError>>,
{
    let started = Instant::now();

    if let Some(cached) = cache.get::<T>(cache_key, cancel).await {
        info!("Cache hit for {}: {}", query_type, cache_key);
        metrics::record_query(query_type, true, started.elapsed().as_secs_f64());
        return Ok(cached);
    }

    info!("Cache miss for {}: {}, querying database", query_type, cache_key);

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReadModelError::Cancelled),
        result = fetch => result,
    };

    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(value) => {
            cache.set(cache_key, &value, cancel).await;
            metrics::record_query(query_type, true, elapsed);
            Ok(value)
        }
        Err(e) => {
            match &e {
                ReadModelError::NotFound { .. } => info!("{} failed: {}", query_type, e),
                ReadModelError::Cancelled => warn!("{} cancelled: {}", query_type, cache_key),
                _ => error!("{} failed for {}: {}", query_type, cache_key, e),
            }
            metrics::record_query(query_type, false, elapsed);
            Err(e)
        }
    }
}
