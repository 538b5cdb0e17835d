use chrono::NaiveDate;
use domain::DomainError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use super::cache_aside::read_through;
use super::dto::{
    BestCustomerResponse, BestCustomersResponse, RevenueByCustomerResponse,
    RevenueByPeriodResponse,
};
use super::keys;
use crate::cache::CacheGateway;
use crate::repositories::{CustomerReadOnlyRepository, OrderReadOnlyRepository};
use crate::ReadModelError;

/// Ranking size used when the caller does not ask for one
pub const DEFAULT_TOP_CUSTOMERS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBestCustomersQuery {
    pub top: u32,
}

impl GetBestCustomersQuery {
    pub fn new(top: Option<u32>) -> Self {
        Self {
            top: top.unwrap_or(DEFAULT_TOP_CUSTOMERS),
        }
    }
}

impl Default for GetBestCustomersQuery {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetRevenueByCustomerQuery {
    pub customer_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetRevenueByPeriodQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl GetRevenueByPeriodQuery {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, DomainError> {
        if start_date > end_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

/// Customers ranked by amount spent
pub struct GetBestCustomersHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetBestCustomersHandler {
    pub fn new(orders: Arc<dyn OrderReadOnlyRepository>, cache: CacheGateway) -> Self {
        Self { orders, cache }
    }

    pub async fn handle(
        &self,
        query: GetBestCustomersQuery,
        cancel: &CancellationToken,
    ) -> Result<BestCustomersResponse, ReadModelError> {
        info!("Building best customers report (top: {})", query.top);

        let cache_key = keys::best_customers(query.top);
        read_through(&self.cache, "best_customers", &cache_key, cancel, async {
            let customers = self
                .orders
                .get_best_customers(query.top)
                .await?
                .into_iter()
                .map(BestCustomerResponse::from)
                .collect();

            Ok::<_, ReadModelError>(BestCustomersResponse { customers })
        })
        .await
    }
}

/// Order count and amount spent by one existing customer
pub struct GetRevenueByCustomerHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    customers: Arc<dyn CustomerReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetRevenueByCustomerHandler {
    pub fn new(
        orders: Arc<dyn OrderReadOnlyRepository>,
        customers: Arc<dyn CustomerReadOnlyRepository>,
        cache: CacheGateway,
    ) -> Self {
        Self {
            orders,
            customers,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: GetRevenueByCustomerQuery,
        cancel: &CancellationToken,
    ) -> Result<RevenueByCustomerResponse, ReadModelError> {
        let customer_id = query.customer_id;
        info!("Building revenue report for customer: {}", customer_id);

        let cache_key = keys::revenue_by_customer(customer_id);
        read_through(&self.cache, "revenue_by_customer", &cache_key, cancel, async {
            let customer = self
                .customers
                .get_by_id(customer_id)
                .await?
                .ok_or_else(|| ReadModelError::not_found("Customer", customer_id))?;

            let totals = self.orders.get_total_by_customer_id(customer_id).await?;

            Ok::<_, ReadModelError>(RevenueByCustomerResponse::new(customer, totals))
        })
        .await
    }
}

/// Order count and revenue over a date range
pub struct GetRevenueByPeriodHandler {
    orders: Arc<dyn OrderReadOnlyRepository>,
    cache: CacheGateway,
}

impl GetRevenueByPeriodHandler {
    pub fn new(orders: Arc<dyn OrderReadOnlyRepository>, cache: CacheGateway) -> Self {
        Self { orders, cache }
    }

    pub async fn handle(
        &self,
        query: GetRevenueByPeriodQuery,
        cancel: &CancellationToken,
    ) -> Result<RevenueByPeriodResponse, ReadModelError> {
        let (start_date, end_date) = (query.start_date(), query.end_date());
        info!("Building revenue report from {} to {}", start_date, end_date);

        let cache_key = keys::revenue_by_period(start_date, end_date);
        read_through(&self.cache, "revenue_by_period", &cache_key, cancel, async {
            let totals = self.orders.get_total_by_period(start_date, end_date).await?;

            Ok::<_, ReadModelError>(RevenueByPeriodResponse {
                start_date,
                end_date,
                total_orders: totals.total_orders,
                total_revenue: totals.total_revenue,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::testing::{FailingCache, RecordingCache};
    use crate::cache::DEFAULT_TTL;
    use crate::repositories::{MockCustomerReadOnlyRepository, MockOrderReadOnlyRepository};
    use domain::{BestCustomer, Customer, CustomerTotals, PeriodTotals};
    use mockall::predicate::eq;

    fn recording_gateway() -> (Arc<RecordingCache>, CacheGateway) {
        let backend = Arc::new(RecordingCache::default());
        let gateway = CacheGateway::new(backend.clone(), DEFAULT_TTL);
        (backend, gateway)
    }

    fn customer(id: Uuid) -> Customer {
        Customer {
            id,
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: None,
            birth_date: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_best_customers_query_defaults_to_five() {
        assert_eq!(GetBestCustomersQuery::new(None).top, 5);
        assert_eq!(GetBestCustomersQuery::default().top, DEFAULT_TOP_CUSTOMERS);
        assert_eq!(GetBestCustomersQuery::new(Some(10)).top, 10);
    }

    #[test]
    fn test_period_query_rejects_reversed_range() {
        assert!(GetRevenueByPeriodQuery::new(date(2024, 3, 31), date(2024, 3, 1)).is_err());
        assert!(GetRevenueByPeriodQuery::new(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[tokio::test]
    async fn test_best_customers_returns_ranking() {
        let ranking = vec![
            BestCustomer {
                customer_id: Uuid::new_v4(),
                customer_name: "Ada".to_string(),
                total_orders: 12,
                total_spent: 2500.0,
            },
            BestCustomer {
                customer_id: Uuid::new_v4(),
                customer_name: "Linus".to_string(),
                total_orders: 3,
                total_spent: 900.5,
            },
        ];
        let expected = ranking.clone();

        let mut repository = MockOrderReadOnlyRepository::new();
        repository
            .expect_get_best_customers()
            .with(eq(3))
            .times(1)
            .returning(move |_| Ok(ranking.clone()));

        let (_, cache) = recording_gateway();
        let handler = GetBestCustomersHandler::new(Arc::new(repository), cache);

        let result = handler
            .handle(GetBestCustomersQuery::new(Some(3)), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.customers.len(), 2);
        assert_eq!(result.customers[0].customer_id, expected[0].customer_id);
        assert_eq!(result.customers[0].customer_name, "Ada");
        assert_eq!(result.customers[0].total_orders, 12);
        assert_eq!(result.customers[0].total_spent, 2500.0);
        assert_eq!(result.customers[1].customer_name, "Linus");
    }

    #[tokio::test]
    async fn test_best_customers_empty_is_not_an_error() {
        let mut repository = MockOrderReadOnlyRepository::new();
        repository
            .expect_get_best_customers()
            .times(1)
            .returning(|_| Ok(vec![]));

        let (_, cache) = recording_gateway();
        let handler = GetBestCustomersHandler::new(Arc::new(repository), cache);

        let result = handler
            .handle(GetBestCustomersQuery::default(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(result.customers.is_empty());
    }

    #[tokio::test]
    async fn test_best_customers_default_asks_repository_for_five() {
        let mut repository = MockOrderReadOnlyRepository::new();
        repository
            .expect_get_best_customers()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(vec![]));

        let (_, cache) = recording_gateway();
        let handler = GetBestCustomersHandler::new(Arc::new(repository), cache);

        handler
            .handle(GetBestCustomersQuery::new(None), &CancellationToken::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_revenue_by_customer_returns_totals() {
        let customer_id = Uuid::new_v4();

        let mut customers = MockCustomerReadOnlyRepository::new();
        customers
            .expect_get_by_id()
            .with(eq(customer_id))
            .times(1)
            .returning(move |id| Ok(Some(customer(id))));

        let mut orders = MockOrderReadOnlyRepository::new();
        orders
            .expect_get_total_by_customer_id()
            .with(eq(customer_id))
            .times(1)
            .returning(|_| {
                Ok(CustomerTotals {
                    total_orders: 4,
                    total_spent: 321.75,
                })
            });

        let (_, cache) = recording_gateway();
        let handler =
            GetRevenueByCustomerHandler::new(Arc::new(orders), Arc::new(customers), cache);

        let result = handler
            .handle(GetRevenueByCustomerQuery { customer_id }, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.customer_id, customer_id);
        assert_eq!(result.customer_name, "Grace Hopper");
        assert_eq!(result.total_orders, 4);
        assert_eq!(result.total_spent, 321.75);
    }

    #[tokio::test]
    async fn test_revenue_by_customer_without_orders_is_zero() {
        let customer_id = Uuid::new_v4();

        let mut customers = MockCustomerReadOnlyRepository::new();
        customers
            .expect_get_by_id()
            .returning(move |id| Ok(Some(customer(id))));

        let mut orders = MockOrderReadOnlyRepository::new();
        orders
            .expect_get_total_by_customer_id()
            .returning(|_| Ok(CustomerTotals::default()));

        let (_, cache) = recording_gateway();
        let handler =
            GetRevenueByCustomerHandler::new(Arc::new(orders), Arc::new(customers), cache);

        let result = handler
            .handle(GetRevenueByCustomerQuery { customer_id }, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.total_orders, 0);
        assert_eq!(result.total_spent, 0.0);
    }

    #[tokio::test]
    async fn test_revenue_by_unknown_customer_is_not_found_and_not_cached() {
        let customer_id = Uuid::new_v4();

        let mut customers = MockCustomerReadOnlyRepository::new();
        customers
            .expect_get_by_id()
            .with(eq(customer_id))
            .times(1)
            .returning(|_| Ok(None));

        let mut orders = MockOrderReadOnlyRepository::new();
        orders.expect_get_total_by_customer_id().never();

        let (backend, cache) = recording_gateway();
        let handler =
            GetRevenueByCustomerHandler::new(Arc::new(orders), Arc::new(customers), cache);

        let result = handler
            .handle(GetRevenueByCustomerQuery { customer_id }, &CancellationToken::new())
            .await;

        match result {
            Err(ReadModelError::NotFound { resource, .. }) => assert_eq!(resource, "Customer"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(backend.writes(), 0);
    }

    #[tokio::test]
    async fn test_revenue_by_period_echoes_range() {
        let (start, end) = (date(2024, 1, 1), date(2024, 12, 31));

        let mut orders = MockOrderReadOnlyRepository::new();
        orders
            .expect_get_total_by_period()
            .with(eq(start), eq(end))
            .times(1)
            .returning(|_, _| {
                Ok(PeriodTotals {
                    total_orders: 10,
                    total_revenue: 1500.5,
                })
            });

        let (_, cache) = recording_gateway();
        let handler = GetRevenueByPeriodHandler::new(Arc::new(orders), cache);

        let result = handler
            .handle(
                GetRevenueByPeriodQuery::new(start, end).unwrap(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.start_date, start);
        assert_eq!(result.end_date, end);
        assert_eq!(result.total_orders, 10);
        assert_eq!(result.total_revenue, 1500.5);
    }

    #[tokio::test]
    async fn test_revenue_by_period_without_orders_is_zero() {
        let (start, end) = (date(2024, 6, 1), date(2024, 6, 30));

        let mut orders = MockOrderReadOnlyRepository::new();
        orders
            .expect_get_total_by_period()
            .returning(|_, _| Ok(PeriodTotals::default()));

        let cache = CacheGateway::new(Arc::new(FailingCache::default()), DEFAULT_TTL);
        let handler = GetRevenueByPeriodHandler::new(Arc::new(orders), cache);

        let result = handler
            .handle(
                GetRevenueByPeriodQuery::new(start, end).unwrap(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.start_date, start);
        assert_eq!(result.end_date, end);
        assert_eq!(result.total_orders, 0);
        assert_eq!(result.total_revenue, 0.0);
    }

    #[tokio::test]
    async fn test_revenue_by_period_is_cached_per_range() {
        let mut orders = MockOrderReadOnlyRepository::new();
        orders
            .expect_get_total_by_period()
            .times(2)
            .returning(|_, _| Ok(PeriodTotals::default()));

        let (backend, cache) = recording_gateway();
        let handler = GetRevenueByPeriodHandler::new(Arc::new(orders), cache);
        let cancel = CancellationToken::new();

        let march = GetRevenueByPeriodQuery::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let april = GetRevenueByPeriodQuery::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();

        handler.handle(march, &cancel).await.unwrap();
        handler.handle(march, &cancel).await.unwrap();
        handler.handle(april, &cancel).await.unwrap();

        assert_eq!(backend.writes(), 2);
    }
}
