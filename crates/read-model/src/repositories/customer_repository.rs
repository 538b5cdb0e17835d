use async_trait::async_trait;
use chrono::NaiveDate;
use domain::Customer;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::ReadModelError;

/// Read-only access to customers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerReadOnlyRepository: Send + Sync {
    /// Get a single customer by ID
    async fn get_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>, ReadModelError>;
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
        }
    }
}

/// PostgreSQL implementation of CustomerReadOnlyRepository
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerReadOnlyRepository for PostgresCustomerRepository {
    async fn get_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>, ReadModelError> {
        let customer = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, phone, birth_date
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer.map(Customer::from))
    }
}
