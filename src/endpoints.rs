//! The API endpoint URIs.

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to get, update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list the transactions of one type.
pub const TRANSACTIONS_BY_TYPE: &str = "/api/transactions/type/{transaction_type}";
/// The route to list the transactions in a category.
pub const TRANSACTIONS_BY_CATEGORY: &str = "/api/transactions/category/{category}";
/// The route to search transactions by merchant.
pub const TRANSACTIONS_BY_MERCHANT: &str = "/api/transactions/merchant/{merchant}";
/// The route to list the transactions within an inclusive date range.
pub const TRANSACTIONS_BY_DATE_RANGE: &str = "/api/transactions/date-range";
/// The route for the income/expense/balance summary.
pub const SUMMARY: &str = "/api/transactions/summary";

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_TYPE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_MERCHANT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_DATE_RANGE);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY);
    }
}
