use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line of an order: one product at the price it was sold for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Order as read from the store, lines included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Sum of all line totals
    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::total).sum()
    }
}
