//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    models::{Transaction, TransactionData, TransactionId, TransactionType},
};

/// Handles persistence and retrieval of transactions.
///
/// The store owns row identity and row timestamps: [TransactionStore::create]
/// assigns the id and stamps both timestamps with the current UTC date.
pub trait TransactionStore {
    /// Insert a new transaction and return the persisted record with its
    /// assigned id and timestamps.
    fn create(&mut self, data: &TransactionData) -> Result<Transaction, Error>;

    /// Overwrite the row matching `transaction.id` with every field of
    /// `transaction`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] when no row matches.
    fn update(&mut self, transaction: &Transaction) -> Result<(), Error>;

    /// Remove the row matching `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] when no row matches.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve a single transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] when no row matches.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every transaction, ordered by date descending. Date ties are
    /// returned in no particular order.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions whose type matches `transaction_type` exactly.
    fn get_by_type(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions whose category matches `category` exactly.
    fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions dated within `date_range` (inclusive).
    fn get_by_date_range(
        &self,
        date_range: RangeInclusive<Date>,
    ) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions whose merchant contains `merchant`,
    /// case-insensitively.
    fn get_by_merchant(&self, merchant: &str) -> Result<Vec<Transaction>, Error>;

    /// Sum the amounts of the transactions whose type matches
    /// `transaction_type`.
    ///
    /// Returns `None` when no rows match, so that callers can tell an empty
    /// result apart from a sum that happens to be zero.
    fn sum_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Option<Decimal>, Error>;

    /// The total number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;
}
