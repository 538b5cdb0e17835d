pub mod customer_repository;
pub mod order_repository;

pub use customer_repository::{CustomerReadOnlyRepository, PostgresCustomerRepository};
pub use order_repository::{OrderReadOnlyRepository, PostgresOrderRepository};

#[cfg(test)]
pub use customer_repository::MockCustomerReadOnlyRepository;
#[cfg(test)]
pub use order_repository::MockOrderReadOnlyRepository;
