//! Implements the business rules layered over the transaction store.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{Transaction, TransactionData, TransactionId, TransactionType},
    stores::TransactionStore,
};

/// The number of decimal places amounts are held at.
const AMOUNT_SCALE: u32 = 2;

/// A derived view of the ledger: income and expense totals and their
/// difference. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: Decimal,
    /// The sum of all expense amounts.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

/// Applies the application's business rules on top of a [TransactionStore]:
/// existence checks, update-merge semantics and amount normalisation.
#[derive(Debug, Clone)]
pub struct TransactionService<T>
where
    T: TransactionStore,
{
    store: T,
}

impl<T> TransactionService<T>
where
    T: TransactionStore,
{
    /// Create a service that persists through `store`.
    pub fn new(store: T) -> Self {
        Self { store }
    }

    /// Every transaction, newest date first.
    pub fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.store.get_all()
    }

    /// Look up a single transaction.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.store.get(id)
    }

    /// Persist a new transaction.
    ///
    /// The store assigns the id and stamps both timestamps; the amount is
    /// normalised to two decimal places before it is written.
    pub fn create(&mut self, data: &TransactionData) -> Result<Transaction, Error> {
        let data = TransactionData {
            amount: data.amount.round_dp(AMOUNT_SCALE),
            ..data.clone()
        };

        self.store.create(&data)
    }

    /// Overwrite every field of the transaction `id` except its id and
    /// creation date with the values from `data`, and refresh the
    /// modification date.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction. The
    /// store is not modified in that case.
    pub fn update(
        &mut self,
        id: TransactionId,
        data: &TransactionData,
    ) -> Result<Transaction, Error> {
        let existing = self.store.get(id)?;

        let updated = Transaction {
            id,
            date: data.date,
            description: data.description.clone(),
            category: data.category.clone(),
            merchant: data.merchant.clone(),
            amount: data.amount.round_dp(AMOUNT_SCALE),
            transaction_type: data.transaction_type,
            payment_method: data.payment_method.clone(),
            notes: data.notes.clone(),
            created_at: existing.created_at,
            updated_at: OffsetDateTime::now_utc().date(),
        };

        self.store.update(&updated)?;

        Ok(updated)
    }

    /// Delete the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction.
    pub fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        self.store.get(id)?;

        self.store.delete(id)
    }

    /// The transactions whose type matches `transaction_type`.
    pub fn get_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>, Error> {
        self.store.get_by_type(transaction_type)
    }

    /// The transactions whose category matches `category` exactly.
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, Error> {
        self.store.get_by_category(category)
    }

    /// The transactions dated within `date_range` (inclusive).
    pub fn get_by_date_range(
        &self,
        date_range: RangeInclusive<Date>,
    ) -> Result<Vec<Transaction>, Error> {
        self.store.get_by_date_range(date_range)
    }

    /// The transactions whose merchant contains `merchant`, case-insensitively.
    pub fn get_by_merchant(&self, merchant: &str) -> Result<Vec<Transaction>, Error> {
        self.store.get_by_merchant(merchant)
    }

    /// The total amount over transactions of `transaction_type`.
    ///
    /// An empty result is coerced to zero so that callers always get a number
    /// to do arithmetic with.
    pub fn total_by_type(&self, transaction_type: TransactionType) -> Result<Decimal, Error> {
        Ok(self
            .store
            .sum_by_type(transaction_type)?
            .unwrap_or(Decimal::ZERO))
    }

    /// Compute the income/expense/balance summary for the current store state.
    pub fn summary(&self) -> Result<Summary, Error> {
        let total_income = self.total_by_type(TransactionType::Income)?;
        let total_expense = self.total_by_type(TransactionType::Expense)?;

        Ok(Summary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        })
    }
}
