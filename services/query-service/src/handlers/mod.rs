pub mod health;
pub mod orders;
pub mod reports;

use axum::http::StatusCode;
use domain::DomainError;
use read_model::ReadModelError;
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Token for one request: cancelled after `timeout`, or when the guard drops
/// because the client went away.
pub fn request_token(timeout: Duration) -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let timer = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = timer.cancelled() => {}
            _ = tokio::time::sleep(timeout) => timer.cancel(),
        }
    });

    let guard = token.clone().drop_guard();
    (token, guard)
}

pub fn query_error(err: ReadModelError) -> (StatusCode, String) {
    let status = match &err {
        ReadModelError::NotFound { .. } => StatusCode::NOT_FOUND,
        ReadModelError::Cancelled => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, err.to_string())
}

pub fn invalid_query(err: DomainError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}
