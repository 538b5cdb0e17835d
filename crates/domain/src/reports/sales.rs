use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the best-customers ranking, as aggregated by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCustomer {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_orders: i64,
    pub total_spent: f64,
}

/// Order count and amount spent by a single customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerTotals {
    pub total_orders: i64,
    pub total_spent: f64,
}

/// Order count and revenue over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub total_orders: i64,
    pub total_revenue: f64,
}
