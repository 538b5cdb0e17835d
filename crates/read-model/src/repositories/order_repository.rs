use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use domain::{BestCustomer, CustomerTotals, Order, OrderLine, PeriodTotals};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::queries::pagination::page_offset;
use crate::ReadModelError;

/// Read-only access to orders and the sales aggregates computed over them
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderReadOnlyRepository: Send + Sync {
    /// Get a single order by ID, lines included
    async fn get_by_id(&self, order_id: Uuid) -> Result<Option<Order>, ReadModelError>;

    /// List one page of all orders, newest first
    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Order>, ReadModelError>;

    /// List one page of a customer's orders, newest first
    async fn get_by_customer_id(
        &self,
        customer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Order>, ReadModelError>;

    /// Count all orders
    async fn get_total_item_count(&self) -> Result<i64, ReadModelError>;

    /// Count orders for a customer
    async fn get_total_item_count_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<i64, ReadModelError>;

    /// Customers ranked by amount spent, highest first
    async fn get_best_customers(&self, top: u32) -> Result<Vec<BestCustomer>, ReadModelError>;

    /// Order count and amount spent by one customer, zero when they have no orders
    async fn get_total_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<CustomerTotals, ReadModelError>;

    /// Order count and revenue for orders created between two dates, both inclusive
    async fn get_total_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodTotals, ReadModelError>;
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderLineRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: f64,
}

#[derive(Debug, FromRow)]
struct BestCustomerRow {
    customer_id: Uuid,
    customer_name: String,
    total_orders: i64,
    total_spent: f64,
}

/// Joins line rows onto their orders, keeping the order of `orders`
fn assemble_orders(orders: Vec<OrderRow>, lines: Vec<OrderLineRow>) -> Vec<Order> {
    let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        lines_by_order.entry(line.order_id).or_default().push(OrderLine {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        });
    }

    orders
        .into_iter()
        .map(|row| Order {
            lines: lines_by_order.remove(&row.id).unwrap_or_default(),
            id: row.id,
            customer_id: row.customer_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
        .collect()
}

/// Half-open timestamp range covering `start` through the whole of `end`
fn period_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_exclusive = end.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    (
        start.and_time(NaiveTime::MIN).and_utc(),
        end_exclusive.and_time(NaiveTime::MIN).and_utc(),
    )
}

/// PostgreSQL implementation of OrderReadOnlyRepository
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_lines(&self, orders: Vec<OrderRow>) -> Result<Vec<Order>, ReadModelError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r#"
            SELECT
                ol.id, ol.order_id, ol.product_id, ol.quantity,
                p.price::float8 AS unit_price
            FROM order_lines ol
            JOIN products p ON p.id = ol.product_id
            WHERE ol.order_id = ANY($1)
            ORDER BY ol.order_id, ol.id
            "#,
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_orders(orders, lines))
    }
}

#[async_trait]
impl OrderReadOnlyRepository for PostgresOrderRepository {
    async fn get_by_id(&self, order_id: Uuid) -> Result<Option<Order>, ReadModelError> {
        let order = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        match order {
            Some(row) => Ok(self.load_lines(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Order>, ReadModelError> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size as i64)
        .bind(page_offset(page, page_size))
        .fetch_all(&self.pool)
        .await?;

        self.load_lines(orders).await
    }

    async fn get_by_customer_id(
        &self,
        customer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Order>, ReadModelError> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at, updated_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(page_size as i64)
        .bind(page_offset(page, page_size))
        .fetch_all(&self.pool)
        .await?;

        self.load_lines(orders).await
    }

    async fn get_total_item_count(&self) -> Result<i64, ReadModelError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_total_item_count_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<i64, ReadModelError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn get_best_customers(&self, top: u32) -> Result<Vec<BestCustomer>, ReadModelError> {
        let rows = sqlx::query_as::<_, BestCustomerRow>(
            r#"
            SELECT
                c.id AS customer_id,
                c.name AS customer_name,
                COUNT(DISTINCT o.id) AS total_orders,
                COALESCE(SUM(ol.quantity * p.price), 0)::float8 AS total_spent
            FROM customers c
            JOIN orders o ON o.customer_id = c.id
            LEFT JOIN order_lines ol ON ol.order_id = o.id
            LEFT JOIN products p ON p.id = ol.product_id
            GROUP BY c.id, c.name
            ORDER BY total_spent DESC, total_orders DESC
            LIMIT $1
            "#,
        )
        .bind(top as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BestCustomer {
                customer_id: row.customer_id,
                customer_name: row.customer_name,
                total_orders: row.total_orders,
                total_spent: row.total_spent,
            })
            .collect())
    }

    async fn get_total_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<CustomerTotals, ReadModelError> {
        let (total_orders, total_spent): (i64, f64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(DISTINCT o.id) AS total_orders,
                COALESCE(SUM(ol.quantity * p.price), 0)::float8 AS total_spent
            FROM orders o
            LEFT JOIN order_lines ol ON ol.order_id = o.id
            LEFT JOIN products p ON p.id = ol.product_id
            WHERE o.customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CustomerTotals {
            total_orders,
            total_spent,
        })
    }

    async fn get_total_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodTotals, ReadModelError> {
        let (from, until) = period_bounds(start, end);

        let (total_orders, total_revenue): (i64, f64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(DISTINCT o.id) AS total_orders,
                COALESCE(SUM(ol.quantity * p.price), 0)::float8 AS total_revenue
            FROM orders o
            LEFT JOIN order_lines ol ON ol.order_id = o.id
            LEFT JOIN products p ON p.id = ol.product_id
            WHERE o.created_at >= $1 AND o.created_at < $2
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await?;

        Ok(PeriodTotals {
            total_orders,
            total_revenue,
        })
    }
}
