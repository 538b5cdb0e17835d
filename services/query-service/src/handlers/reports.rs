use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use read_model::queries::{
    BestCustomersResponse, GetBestCustomersQuery, GetRevenueByCustomerQuery,
    GetRevenueByPeriodQuery, RevenueByCustomerResponse, RevenueByPeriodResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{invalid_query, query_error, request_token};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BestCustomersParams {
    pub top: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Customers ranked by total spent
pub async fn best_customers_handler(
    State(state): State<AppState>,
    Query(params): Query<BestCustomersParams>,
) -> Result<Json<BestCustomersResponse>, (StatusCode, String)> {
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .best_customers
        .handle(GetBestCustomersQuery::new(params.top), &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}

pub async fn revenue_by_customer_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<RevenueByCustomerResponse>, (StatusCode, String)> {
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .revenue_by_customer
        .handle(GetRevenueByCustomerQuery { customer_id }, &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}

/// Order count and revenue between two dates, both inclusive
pub async fn revenue_by_period_handler(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<RevenueByPeriodResponse>, (StatusCode, String)> {
    let query =
        GetRevenueByPeriodQuery::new(params.start_date, params.end_date).map_err(invalid_query)?;
    let (cancel, _guard) = request_token(state.request_timeout);

    state
        .revenue_by_period
        .handle(query, &cancel)
        .await
        .map(Json)
        .map_err(query_error)
}
