//! Cached read queries over orders and sales reports.
//!
//! Every handler follows the same cache-aside flow through [`read_through`]:
//! derive a key from the query, serve a cached response when one exists,
//! otherwise load from the repositories, shape the response, cache it and
//! return it.

pub mod cache_aside;
pub mod dto;
pub mod keys;
pub mod orders;
pub mod pagination;
pub mod reports;

pub use cache_aside::read_through;
pub use dto::{
    BestCustomerResponse, BestCustomersResponse, OrderDetailResponse, OrderLineResponse,
    OrderListResponse, OrderSummaryResponse, RevenueByCustomerResponse, RevenueByPeriodResponse,
};
pub use orders::{
    GetOrderByIdHandler, GetOrderByIdQuery, GetOrderListHandler, GetOrderListQuery,
    GetOrdersByCustomerHandler, GetOrdersByCustomerQuery,
};
pub use pagination::{total_pages, PageRequest};
pub use reports::{
    GetBestCustomersHandler, GetBestCustomersQuery, GetRevenueByCustomerHandler,
    GetRevenueByCustomerQuery, GetRevenueByPeriodHandler, GetRevenueByPeriodQuery,
    DEFAULT_TOP_CUSTOMERS,
};
