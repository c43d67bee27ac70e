//! Defines the JSON endpoints for creating, querying and managing
//! transactions.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use time::Date;

use crate::{
    AppState, Error,
    models::{TransactionData, TransactionId, TransactionType},
    stores::TransactionStore,
};

/// A route handler for listing every transaction, newest date first.
pub async fn get_transactions<T>(
    State(state): State<AppState<T>>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state.transaction_service.get_all()?;

    Ok(Json(transactions))
}

/// A route handler for getting a transaction by its id.
///
/// Responds with 404 if no transaction has the requested id.
pub async fn get_transaction<T>(
    State(state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transaction = state.transaction_service.get(transaction_id)?;

    Ok(Json(transaction))
}

/// A route handler for creating a new transaction.
///
/// The payload is validated before it reaches the service: blank required
/// fields and oversized notes are rejected with 400 and nothing is persisted.
pub async fn create_transaction<T>(
    State(mut state): State<AppState<T>>,
    Json(data): Json<TransactionData>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    data.validate()?;

    let transaction = state.transaction_service.create(&data)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for overwriting an existing transaction.
///
/// Responds with 404 if no transaction has the requested id.
pub async fn update_transaction<T>(
    State(mut state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    data.validate()?;

    let transaction = state.transaction_service.update(transaction_id, &data)?;

    Ok(Json(transaction))
}

/// A route handler for deleting a transaction.
///
/// Responds with 404 if no transaction has the requested id.
pub async fn delete_transaction<T>(
    State(mut state): State<AppState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_service.delete(transaction_id)?;

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

/// A route handler for listing the transactions of one type.
///
/// Responds with 400 when the path segment is not a transaction type.
pub async fn get_transactions_by_type<T>(
    State(state): State<AppState<T>>,
    Path(transaction_type): Path<String>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transaction_type = transaction_type.parse::<TransactionType>()?;
    let transactions = state.transaction_service.get_by_type(transaction_type)?;

    Ok(Json(transactions))
}

/// A route handler for listing the transactions in a category.
pub async fn get_transactions_by_category<T>(
    State(state): State<AppState<T>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state.transaction_service.get_by_category(&category)?;

    Ok(Json(transactions))
}

/// A route handler for searching transactions by merchant.
///
/// The match is a case-insensitive substring match.
pub async fn get_transactions_by_merchant<T>(
    State(state): State<AppState<T>>,
    Path(merchant): Path<String>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state.transaction_service.get_by_merchant(&merchant)?;

    Ok(Json(transactions))
}

/// The query parameters for [get_transactions_by_date_range].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    /// The first day to include, as an ISO-8601 calendar date.
    start_date: Date,
    /// The last day to include, as an ISO-8601 calendar date.
    end_date: Date,
}

/// A route handler for listing the transactions within an inclusive date
/// range.
///
/// Missing or malformed date parameters are rejected with 400 by the query
/// extractor.
pub async fn get_transactions_by_date_range<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<DateRangeParams>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state
        .transaction_service
        .get_by_date_range(params.start_date..=params.end_date)?;

    Ok(Json(transactions))
}

/// A route handler for the income/expense/balance summary.
pub async fn get_summary<T>(
    State(state): State<AppState<T>>,
) -> Result<impl IntoResponse, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let summary = state.transaction_service.summary()?;

    Ok(Json(summary))
}

#[cfg(test)]
mod transaction_route_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        AppState, Transaction, TransactionService, TransactionType, build_router, endpoints,
        initialize_db, stores::sqlite::SQLiteTransactionStore,
    };

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize_db(&connection).expect("Could not initialize database.");

        let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)));
        let state = AppState::new(TransactionService::new(store));

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn test_payload() -> Value {
        json!({
            "date": "2024-01-01",
            "description": "Test",
            "category": "Food",
            "merchant": "X",
            "amount": "10.00",
            "type": "Expense",
            "notes": "",
        })
    }

    async fn post_transaction(server: &TestServer, payload: &Value) -> Transaction {
        let response = server.post(endpoints::TRANSACTIONS).json(payload).await;

        response.assert_status(StatusCode::CREATED);

        response.json::<Transaction>()
    }

    #[tokio::test]
    async fn get_transactions_returns_empty_list_for_empty_store() {
        let server = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>(), vec![]);
    }

    #[tokio::test]
    async fn create_transaction_returns_created_record() {
        let server = get_test_server();

        let transaction = post_transaction(&server, &test_payload()).await;

        let today = OffsetDateTime::now_utc().date();
        assert!(transaction.id > 0);
        assert_eq!(transaction.date, date!(2024 - 01 - 01));
        assert_eq!(transaction.description, "Test");
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.merchant, "X");
        assert_eq!(transaction.amount, dec!(10.00));
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.payment_method, None);
        assert_eq!(transaction.notes, "");
        assert_eq!(transaction.created_at, today);
        assert_eq!(transaction.updated_at, today);
    }

    #[tokio::test]
    async fn create_transaction_rejects_blank_required_field() {
        let server = get_test_server();
        let mut payload = test_payload();
        payload["description"] = json!("   ");

        let response = server.post(endpoints::TRANSACTIONS).json(&payload).await;

        response.assert_status_bad_request();

        // Nothing should have been persisted.
        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions, vec![]);
    }

    #[tokio::test]
    async fn get_transaction_returns_record_by_id() {
        let server = get_test_server();
        let inserted_transaction = post_transaction(&server, &test_payload()).await;

        let response = server
            .get(&format!(
                "{}/{}",
                endpoints::TRANSACTIONS,
                inserted_transaction.id
            ))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Transaction>(), inserted_transaction);
    }

    #[tokio::test]
    async fn get_transaction_returns_not_found_for_missing_id() {
        let server = get_test_server();

        let response = server
            .get(&format!("{}/{}", endpoints::TRANSACTIONS, 1337))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn update_transaction_overwrites_all_fields_except_id_and_created_at() {
        let server = get_test_server();
        let inserted_transaction = post_transaction(&server, &test_payload()).await;

        let response = server
            .put(&format!(
                "{}/{}",
                endpoints::TRANSACTIONS,
                inserted_transaction.id
            ))
            .json(&json!({
                "date": "2024-02-02",
                "description": "Taxi",
                "category": "Transportation",
                "merchant": "City Cabs",
                "amount": "32.25",
                "type": "Expense",
                "paymentMethod": "Credit Card",
                "notes": "Late night ride",
            }))
            .await;

        response.assert_status_ok();
        let updated_transaction = response.json::<Transaction>();
        assert_eq!(updated_transaction.id, inserted_transaction.id);
        assert_eq!(
            updated_transaction.created_at,
            inserted_transaction.created_at
        );
        assert_eq!(updated_transaction.date, date!(2024 - 02 - 02));
        assert_eq!(updated_transaction.description, "Taxi");
        assert_eq!(updated_transaction.merchant, "City Cabs");
        assert_eq!(updated_transaction.amount, dec!(32.25));
        assert_eq!(
            updated_transaction.payment_method,
            Some("Credit Card".to_owned())
        );
    }

    #[tokio::test]
    async fn update_transaction_returns_not_found_for_missing_id() {
        let server = get_test_server();

        let response = server
            .put(&format!("{}/{}", endpoints::TRANSACTIONS, 1337))
            .json(&test_payload())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_transaction_responds_with_message() {
        let server = get_test_server();
        let inserted_transaction = post_transaction(&server, &test_payload()).await;

        let response = server
            .delete(&format!(
                "{}/{}",
                endpoints::TRANSACTIONS,
                inserted_transaction.id
            ))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Transaction deleted successfully" })
        );

        server
            .get(&format!(
                "{}/{}",
                endpoints::TRANSACTIONS,
                inserted_transaction.id
            ))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_transaction_returns_not_found_for_missing_id() {
        let server = get_test_server();

        let response = server
            .delete(&format!("{}/{}", endpoints::TRANSACTIONS, 1337))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_transactions_by_type_filters_the_list() {
        let server = get_test_server();
        let mut income = test_payload();
        income["type"] = json!("Income");
        income["merchant"] = json!("Employer");
        post_transaction(&server, &income).await;
        post_transaction(&server, &test_payload()).await;

        let response = server.get("/api/transactions/type/Income").await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].merchant, "Employer");
    }

    #[tokio::test]
    async fn get_transactions_by_type_rejects_unknown_type() {
        let server = get_test_server();

        let response = server.get("/api/transactions/type/Transfer").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn get_transactions_by_category_filters_the_list() {
        let server = get_test_server();
        let mut groceries = test_payload();
        groceries["category"] = json!("Groceries");
        post_transaction(&server, &groceries).await;
        post_transaction(&server, &test_payload()).await;

        let response = server.get("/api/transactions/category/Groceries").await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category, "Groceries");
    }

    #[tokio::test]
    async fn get_transactions_by_merchant_matches_substring_case_insensitively() {
        let server = get_test_server();
        let mut groceries = test_payload();
        groceries["merchant"] = json!("Whole Foods");
        post_transaction(&server, &groceries).await;
        post_transaction(&server, &test_payload()).await;

        let response = server.get("/api/transactions/merchant/whole").await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].merchant, "Whole Foods");
    }

    #[tokio::test]
    async fn get_transactions_by_date_range_includes_both_bounds() {
        let server = get_test_server();
        for date in ["2025-10-05", "2025-10-10", "2025-10-15", "2025-10-22"] {
            let mut payload = test_payload();
            payload["date"] = json!(date);
            post_transaction(&server, &payload).await;
        }

        let response = server
            .get(endpoints::TRANSACTIONS_BY_DATE_RANGE)
            .add_query_param("startDate", "2025-10-05")
            .add_query_param("endDate", "2025-10-15")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>().len(), 3);
    }

    #[tokio::test]
    async fn get_transactions_by_date_range_rejects_malformed_dates() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_BY_DATE_RANGE)
            .add_query_param("startDate", "not-a-date")
            .add_query_param("endDate", "2025-10-15")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn get_summary_computes_balance() {
        let server = get_test_server();
        let mut income = test_payload();
        income["type"] = json!("Income");
        income["amount"] = json!("3500.00");
        post_transaction(&server, &income).await;

        let mut expense = test_payload();
        expense["amount"] = json!("152.47");
        post_transaction(&server, &expense).await;

        let response = server.get(endpoints::SUMMARY).await;

        response.assert_status_ok();
        let summary = response.json::<Value>();
        assert_eq!(summary["totalIncome"], "3500.00");
        assert_eq!(summary["totalExpense"], "152.47");
        assert_eq!(summary["balance"], "3347.53");
    }
}
