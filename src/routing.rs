//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, endpoints,
    routes::transactions::{
        create_transaction, delete_transaction, get_summary, get_transaction,
        get_transactions, get_transactions_by_category, get_transactions_by_date_range,
        get_transactions_by_merchant, get_transactions_by_type, update_transaction,
    },
    stores::TransactionStore,
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions::<T>).post(create_transaction::<T>),
        )
        .route(endpoints::SUMMARY, get(get_summary::<T>))
        .route(
            endpoints::TRANSACTIONS_BY_DATE_RANGE,
            get(get_transactions_by_date_range::<T>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_TYPE,
            get(get_transactions_by_type::<T>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_CATEGORY,
            get(get_transactions_by_category::<T>),
        )
        .route(
            endpoints::TRANSACTIONS_BY_MERCHANT,
            get(get_transactions_by_merchant::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction::<T>)
                .put(update_transaction::<T>)
                .delete(delete_transaction::<T>),
        )
        .with_state(state)
}
