//! Cache key derivation.
//!
//! Keys are the handler's prefix followed by every query parameter that
//! affects the response, in a fixed order. No prefix is a prefix of another.

use chrono::NaiveDate;
use uuid::Uuid;

pub const ORDER_DETAIL_PREFIX: &str = "order_detail_";
pub const ORDERS_LIST_PREFIX: &str = "orders_list_";
pub const ORDERS_CUSTOMER_PREFIX: &str = "orders_customer_";
pub const BEST_CUSTOMERS_PREFIX: &str = "best_customers_";
pub const REVENUE_CUSTOMER_PREFIX: &str = "revenue_customer_";
pub const REVENUE_PERIOD_PREFIX: &str = "revenue_period_";

pub const ALL_PREFIXES: [&str; 6] = [
    ORDER_DETAIL_PREFIX,
    ORDERS_LIST_PREFIX,
    ORDERS_CUSTOMER_PREFIX,
    BEST_CUSTOMERS_PREFIX,
    REVENUE_CUSTOMER_PREFIX,
    REVENUE_PERIOD_PREFIX,
];

pub fn order_detail(order_id: Uuid) -> String {
    format!("{}{}", ORDER_DETAIL_PREFIX, order_id)
}

pub fn orders_list(page: u32, page_size: u32) -> String {
    format!("{}page_{}_size_{}", ORDERS_LIST_PREFIX, page, page_size)
}

pub fn orders_by_customer(customer_id: Uuid, page: u32, page_size: u32) -> String {
    format!(
        "{}{}_page_{}_size_{}",
        ORDERS_CUSTOMER_PREFIX, customer_id, page, page_size
    )
}

pub fn best_customers(top: u32) -> String {
    format!("{}{}", BEST_CUSTOMERS_PREFIX, top)
}

pub fn revenue_by_customer(customer_id: Uuid) -> String {
    format!("{}{}", REVENUE_CUSTOMER_PREFIX, customer_id)
}

/// Dates are rendered as fixed-width `ddMMyyyy`
pub fn revenue_by_period(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}{}_{}",
        REVENUE_PERIOD_PREFIX,
        start.format("%d%m%Y"),
        end.format("%d%m%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_do_not_overlap() {
        for (i, a) in ALL_PREFIXES.iter().enumerate() {
            for (j, b) in ALL_PREFIXES.iter().enumerate() {
                if i != j {
                    assert!(!a.starts_with(b), "{} overlaps {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_keys_are_deterministic() {
        let id = Uuid::new_v4();
        assert_eq!(order_detail(id), order_detail(id));
        assert_eq!(orders_by_customer(id, 2, 10), orders_by_customer(id, 2, 10));
        assert_eq!(revenue_by_customer(id), revenue_by_customer(id));
    }

    #[test]
    fn test_key_formats() {
        let id = Uuid::parse_str("0190a6f2-7c3e-7b1a-9a2e-3f4d5c6b7a81").unwrap();

        assert_eq!(
            order_detail(id),
            "order_detail_0190a6f2-7c3e-7b1a-9a2e-3f4d5c6b7a81"
        );
        assert_eq!(orders_list(1, 10), "orders_list_page_1_size_10");
        assert_eq!(
            orders_by_customer(id, 3, 5),
            "orders_customer_0190a6f2-7c3e-7b1a-9a2e-3f4d5c6b7a81_page_3_size_5"
        );
        assert_eq!(best_customers(5), "best_customers_5");
    }

    #[test]
    fn test_period_key_uses_fixed_width_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        assert_eq!(revenue_by_period(start, end), "revenue_period_01012024_31122024");
    }

    #[test]
    fn test_different_parameters_give_different_keys() {
        assert_ne!(orders_list(1, 10), orders_list(10, 1));
        assert_ne!(orders_list(1, 10), orders_list(1, 100));
        assert_ne!(orders_list(11, 1), orders_list(1, 11));
        assert_ne!(best_customers(5), best_customers(50));

        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_ne!(revenue_by_period(start, end), revenue_by_period(end, start));
    }
}
