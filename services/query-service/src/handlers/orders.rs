use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use read_model::queries::{
    GetOrderByIdQuery, GetOrderListQuery, GetOrdersByCustomerQuery, OrderDetailResponse,
    OrderListResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::{invalid_query, query_error, request_token};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

/// Get a single order by ID
pub async fn get_order_handler(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, (StatusCode, String)> {
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .order_by_id
        .handle(GetOrderByIdQuery { id: order_id }, &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}

/// List all orders, one page at a time
pub async fn list_orders_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<OrderListResponse>, (StatusCode, String)> {
    info!(
        "Listing orders (page: {}, page_size: {})",
        params.page, params.page_size
    );

    let query = GetOrderListQuery::new(params.page, params.page_size).map_err(invalid_query)?;
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .order_list
        .handle(query, &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}

/// List orders for a customer with pagination
pub async fn list_customer_orders_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<OrderListResponse>, (StatusCode, String)> {
    let query = GetOrdersByCustomerQuery::new(customer_id, params.page, params.page_size)
        .map_err(invalid_query)?;
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .orders_by_customer
        .handle(query, &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}
