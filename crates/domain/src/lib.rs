pub mod entities;
pub mod errors;
pub mod reports;

pub use entities::{Customer, Order, OrderLine};
pub use errors::DomainError;
pub use reports::{BestCustomer, CustomerTotals, PeriodTotals};
