//! Defines the transaction record, its wire representation and input validation.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer primary key assigned by the store.
pub type TransactionId = i64;

/// The maximum length of the free-text notes field, in characters.
pub const NOTES_MAX_CHARS: usize = 500;

/// Whether a transaction brings money in or sends it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money earned, e.g. salary or dividends.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The exact text stored in the database and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransaction(format!(
                "\"{other}\" is not a transaction type, expected \"Income\" or \"Expense\""
            ))),
        }
    }
}

/// An income or expense event in the ledger.
///
/// Instances are only created by the store, which assigns the id and stamps
/// both timestamps. Clients describe transactions with [TransactionData].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the money moved.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The spending or income category, e.g. "Food & Dining".
    pub category: String,
    /// Who was paid, or who paid.
    pub merchant: String,
    /// The amount of money, held at two decimal places.
    pub amount: Decimal,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// How the transaction was paid, e.g. "Credit Card".
    pub payment_method: Option<String>,
    /// Free-text notes, up to [NOTES_MAX_CHARS] characters. May be empty.
    pub notes: String,
    /// The day the record was created. Never changes after creation.
    pub created_at: Date,
    /// The day the record was last modified.
    pub updated_at: Date,
}

/// The client-supplied fields of a transaction.
///
/// Used as the request payload for both creating a transaction and
/// overwriting an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    /// When the money moved.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The spending or income category.
    pub category: String,
    /// Who was paid, or who paid.
    pub merchant: String,
    /// The amount of money.
    pub amount: Decimal,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// How the transaction was paid.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Free-text notes. Required, but may be the empty string.
    pub notes: String,
}

impl TransactionData {
    /// Check the input constraints that the type system cannot express.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the description, category or
    /// merchant is blank, or if the notes exceed [NOTES_MAX_CHARS] characters.
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::InvalidTransaction(
                "description must not be blank".to_owned(),
            ));
        }

        if self.category.trim().is_empty() {
            return Err(Error::InvalidTransaction(
                "category must not be blank".to_owned(),
            ));
        }

        if self.merchant.trim().is_empty() {
            return Err(Error::InvalidTransaction(
                "merchant must not be blank".to_owned(),
            ));
        }

        if self.notes.chars().count() > NOTES_MAX_CHARS {
            return Err(Error::InvalidTransaction(format!(
                "notes must be at most {NOTES_MAX_CHARS} characters"
            )));
        }

        Ok(())
    }
}
