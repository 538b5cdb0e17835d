pub mod sales;

pub use sales::{BestCustomer, CustomerTotals, PeriodTotals};
