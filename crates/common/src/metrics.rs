use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

lazy_static! {
    // Query metrics
    pub static ref QUERY_COUNTER: CounterVec = register_counter_vec!(
        "orders_queries_total",
        "Total number of queries processed",
        &["query_type", "status"]
    )
    .expect("metric cannot be created");

    pub static ref QUERY_DURATION: HistogramVec = register_histogram_vec!(
        "orders_query_duration_seconds",
        "Query processing duration in seconds",
        &["query_type"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("metric cannot be created");

    // Cache metrics
    pub static ref CACHE_REQUEST_COUNTER: CounterVec = register_counter_vec!(
        "orders_cache_requests_total",
        "Total number of cache requests by outcome",
        &["cache_type", "status"]
    )
    .expect("metric cannot be created");
}

/// Outcome of a single cache lookup or write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Error,
}

impl CacheOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Error => "error",
        }
    }
}

/// Get all metrics in Prometheus text format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Helper function to record query execution
pub fn record_query(query_type: &str, success: bool, duration_secs: f64) {
    let status = if success { "success" } else { "error" };
    QUERY_COUNTER
        .with_label_values(&[query_type, status])
        .inc();
    QUERY_DURATION
        .with_label_values(&[query_type])
        .observe(duration_secs);
}

/// Helper function to record a cache request outcome
pub fn record_cache_request(cache_type: &str, outcome: CacheOutcome) {
    CACHE_REQUEST_COUNTER
        .with_label_values(&[cache_type, outcome.as_str()])
        .inc();
}
