use chrono::{DateTime, NaiveDate, Utc};
use domain::{BestCustomer, Customer, CustomerTotals, Order, OrderLine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pagination::total_pages;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
}

impl From<&OrderLine> for OrderLineResponse {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total: line.total(),
        }
    }
}

/// Full order with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLineResponse>,
    pub total: f64,
}

impl From<Order> for OrderDetailResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            updated_at: order.updated_at,
            lines: order.lines.iter().map(OrderLineResponse::from).collect(),
            total: order.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total: f64,
}

impl From<&Order> for OrderSummaryResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            total: order.total(),
        }
    }
}

/// One page of order summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub total_items: i64,
    pub page: u32,
    pub total_pages: i64,
    pub orders: Vec<OrderSummaryResponse>,
}

impl OrderListResponse {
    pub fn new(orders: &[Order], total_items: i64, page: u32, page_size: u32) -> Self {
        Self {
            total_items,
            page,
            total_pages: total_pages(total_items, page_size),
            orders: orders.iter().map(OrderSummaryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCustomerResponse {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_orders: i64,
    pub total_spent: f64,
}

impl From<BestCustomer> for BestCustomerResponse {
    fn from(best: BestCustomer) -> Self {
        Self {
            customer_id: best.customer_id,
            customer_name: best.customer_name,
            total_orders: best.total_orders,
            total_spent: best.total_spent,
        }
    }
}

/// Customers ranked by amount spent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCustomersResponse {
    pub customers: Vec<BestCustomerResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByCustomerResponse {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_orders: i64,
    pub total_spent: f64,
}

impl RevenueByCustomerResponse {
    pub fn new(customer: Customer, totals: CustomerTotals) -> Self {
        Self {
            customer_id: customer.id,
            customer_name: customer.name,
            total_orders: totals.total_orders,
            total_spent: totals.total_spent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByPeriodResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_orders: i64,
    pub total_revenue: f64,
}
