use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_backend: &'static str,
    pub cache: &'static str,
}

/// Liveness plus cache reachability; a down cache degrades, it never fails the service
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = match state.cache.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Cache health check failed: {}", e);
            "down"
        }
    };

    Json(HealthResponse {
        status: if cache == "up" { "healthy" } else { "degraded" },
        cache_backend: state.cache.backend_name(),
        cache,
    })
}
