//! Implements a struct that holds the state of the REST server.

use crate::{service::TransactionService, stores::TransactionStore};

/// The state of the REST server.
///
/// Generic over the transaction store so that route handlers can be tested
/// against any [TransactionStore] implementation.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The service for managing [transactions](crate::Transaction).
    pub transaction_service: TransactionService<T>,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(transaction_service: TransactionService<T>) -> Self {
        Self {
            transaction_service,
        }
    }
}
