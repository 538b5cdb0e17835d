use domain::DomainError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use super::cache_aside::read_through;
use super::dto::{OrderDetailResponse, OrderListResponse};
use super::keys;
use super::pagination::PageRequest;
use crate::cache::CacheGateway;
use crate::repositories::OrderReadOnlyRepository;
use crate::ReadModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrderByIdQuery {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrderListQuery {
    pub page: PageRequest,
}

impl GetOrderListQuery {
    pub fn new(page: u32, page_size: u32) -> Result<Self, DomainError> {
        Ok(Self {
            page: PageRequest::new(page, page_size)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrdersByCustomerQuery {
    pub customer_id: Uuid,
    pub page: PageRequest,
}

impl GetOrdersByCustomerQuery {
    pub fn new(customer_id: Uuid, page: u32, page_size: u32) -> Result<Self, DomainError> {
        Ok(Self {
            customer_id,
            page: PageRequest::new(page, page_size)?,
        })
    }
}

/// Single order with its lines
pub struct GetOrderByIdHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetOrderByIdHandler {
    pub fn new(orders: Arc<dyn OrderReadOnlyRepository>, cache: CacheGateway) -> Self {
        Self { orders, cache }
    }

    pub async fn handle(
        &self,
        query: GetOrderByIdQuery,
        cancel: &CancellationToken,
    ) -> Result<OrderDetailResponse, ReadModelError> {
        info!("Fetching order: {}", query.id);

        let cache_key = keys::order_detail(query.id);
        read_through(&self.cache, "order_detail", &cache_key, cancel, async {
            let order = self
                .orders
                .get_by_id(query.id)
                .await?
                .ok_or_else(|| ReadModelError::not_found("Order", query.id))?;

            Ok::<_, ReadModelError>(OrderDetailResponse::from(order))
        })
        .await
    }
}

/// Paginated list of all orders
pub struct GetOrderListHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetOrderListHandler {
    pub fn new(orders: Arc<dyn OrderReadOnlyRepository>, cache: CacheGateway) -> Self {
        Self { orders, cache }
    }

    pub async fn handle(
        &self,
        query: GetOrderListQuery,
        cancel: &CancellationToken,
    ) -> Result<OrderListResponse, ReadModelError> {
        let (page, page_size) = (query.page.page(), query.page.page_size());
        info!("Listing orders (page: {}, page_size: {})", page, page_size);

        let cache_key = keys::orders_list(page, page_size);
        read_through(&self.cache, "orders_list", &cache_key, cancel, async {
            let orders = self.orders.get_all(page, page_size).await?;
            let total_items = self.orders.get_total_item_count().await?;

            Ok::<_, ReadModelError>(OrderListResponse::new(&orders, total_items, page, page_size))
        })
        .await
    }
}

/// Paginated list of one customer's orders; an unknown customer simply has none
pub struct GetOrdersByCustomerHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetOrdersByCustomerHandler {
    pub fn new(orders: Arc<dyn OrderReadOnlyRepository>, cache: CacheGateway) -> Self {
        Self { orders, cache }
    }

    pub async fn handle(
        &self,
        query: GetOrdersByCustomerQuery,
        cancel: &CancellationToken,
    ) -> Result<OrderListResponse, ReadModelError> {
        let customer_id = query.customer_id;
        let (page, page_size) = (query.page.page(), query.page.page_size());
        info!(
            "Listing orders for customer: {} (page: {}, page_size: {})",
            customer_id, page, page_size
        );

        let cache_key = keys::orders_by_customer(customer_id, page, page_size);
        read_through(&self.cache, "orders_by_customer", &cache_key, cancel, async {
            let orders = self
                .orders
                .get_by_customer_id(customer_id, page, page_size)
                .await?;
            let total_items = self
                .orders
                .get_total_item_count_by_customer(customer_id)
                .await?;

            Ok::<_, ReadModelError>(OrderListResponse::new(&orders, total_items, page, page_size))
        })
        .await
    }
}
