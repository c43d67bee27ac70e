//! Implements a SQLite backed transaction store.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef},
};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{Transaction, TransactionData, TransactionId, TransactionType},
    stores::TransactionStore,
};

const TRANSACTION_COLUMNS: &str =
    "id, date, description, category, merchant, amount, type, payment_method, notes, \
     created_at, updated_at";

/// Stores transactions in a SQLite database.
///
/// The table must have been set up with [initialize](crate::initialize_db)
/// before the store is used.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Map a database row to a [Transaction].
    ///
    /// Expects the row to contain all the table columns in the order they
    /// were defined.
    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let amount_text: String = row.get(5)?;
        let amount = amount_text.parse::<Decimal>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            date: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            merchant: row.get(4)?,
            amount,
            transaction_type: row.get(6)?,
            payment_method: row.get(7)?,
            notes: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<TransactionType>()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The database assigns the id and both timestamps are stamped with the
    /// current UTC date.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn create(&mut self, data: &TransactionData) -> Result<Transaction, Error> {
        let today = OffsetDateTime::now_utc().date();

        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO \"transaction\" (date, description, category, merchant, amount, \
                 type, payment_method, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    data.date,
                    &data.description,
                    &data.category,
                    &data.merchant,
                    data.amount.to_string(),
                    data.transaction_type,
                    &data.payment_method,
                    &data.notes,
                    today,
                    today,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite the row matching `transaction.id` with every field of
    /// `transaction`.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::NotFound] if no row matches `transaction.id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, transaction: &Transaction) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE \"transaction\"
             SET date = ?1, description = ?2, category = ?3, merchant = ?4, amount = ?5,
                 type = ?6, payment_method = ?7, notes = ?8, created_at = ?9, updated_at = ?10
             WHERE id = ?11",
            (
                transaction.date,
                &transaction.description,
                &transaction.category,
                &transaction.merchant,
                transaction.amount.to_string(),
                transaction.transaction_type,
                &transaction.payment_method,
                &transaction.notes,
                transaction.created_at,
                transaction.updated_at,
                transaction.id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Remove the row matching `id`.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::NotFound] if no row matches `id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" ORDER BY date DESC"
            ))?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn get_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE type = :type"
            ))?
            .query_map(&[(":type", &transaction_type)], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE category = :category"
            ))?
            .query_map(&[(":category", &category)], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn get_by_date_range(
        &self,
        date_range: RangeInclusive<Date>,
    ) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" \
                 WHERE date BETWEEN :start AND :end"
            ))?
            .query_map(
                &[(":start", date_range.start()), (":end", date_range.end())],
                Self::map_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve the transactions whose merchant contains `merchant`,
    /// case-insensitively.
    ///
    /// Matching is done with `instr` rather than `LIKE` so that `%` and `_`
    /// in the search text are treated literally.
    fn get_by_merchant(&self, merchant: &str) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" \
                 WHERE instr(lower(merchant), lower(:merchant)) > 0"
            ))?
            .query_map(&[(":merchant", &merchant)], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Sum the amounts of the transactions whose type matches
    /// `transaction_type`, or `None` when no rows match.
    ///
    /// The sum is computed in decimal arithmetic from the stored amount text,
    /// so the result is exact.
    fn sum_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Option<Decimal>, Error> {
        let connection = self.connection.lock().unwrap();

        let amounts = connection
            .prepare("SELECT amount FROM \"transaction\" WHERE type = :type")?
            .query_map(&[(":type", &transaction_type)], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if amounts.is_empty() {
            return Ok(None);
        }

        let mut total = Decimal::ZERO;
        for amount_text in amounts {
            let amount = amount_text.parse::<Decimal>().map_err(|error| {
                Error::SqlError(rusqlite::Error::FromSqlConversionFailure(
                    0,
                    Type::Text,
                    Box::new(error),
                ))
            })?;
            total += amount;
        }

        Ok(Some(total))
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|error| error.into())
    }
}
