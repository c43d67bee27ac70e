//! Populates an empty store with sample data so that a fresh instance has
//! something to show.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::{Date, macros::date};

use crate::{
    Error,
    models::{TransactionData, TransactionType},
    stores::TransactionStore,
};

/// Insert ten demo transactions if `store` is empty.
///
/// Runs once at process start. Returns the number of rows inserted, which is
/// zero when the store already holds data.
pub fn seed_demo_data<T>(store: &mut T) -> Result<usize, Error>
where
    T: TransactionStore,
{
    if store.count()? > 0 {
        return Ok(0);
    }

    let seeds = demo_transactions();
    let row_count = seeds.len();

    for data in &seeds {
        store.create(data)?;
    }

    tracing::info!("Seeded {row_count} demo transactions");

    Ok(row_count)
}

fn demo_transactions() -> Vec<TransactionData> {
    use TransactionType::{Expense, Income};

    vec![
        demo_transaction(
            date!(2025 - 10 - 01),
            "Salary",
            "Income",
            "Employer",
            dec!(3500.00),
            Income,
            "Direct Deposit",
            "Monthly salary - October salary",
        ),
        demo_transaction(
            date!(2025 - 10 - 03),
            "Groceries at Whole Foods",
            "Food & Dining",
            "Whole Foods",
            dec!(152.47),
            Expense,
            "Credit Card",
            "Grocery shopping - Weekly groceries",
        ),
        demo_transaction(
            date!(2025 - 10 - 05),
            "Electric Bill",
            "Bills & Utilities",
            "Electric Co",
            dec!(127.89),
            Expense,
            "Auto Pay",
            "Monthly electric bill - September usage",
        ),
        demo_transaction(
            date!(2025 - 10 - 07),
            "Movie Night",
            "Entertainment",
            "AMC Theatres",
            dec!(45.50),
            Expense,
            "Debit Card",
            "Cinema tickets and snacks - Went with friends",
        ),
        demo_transaction(
            date!(2025 - 10 - 10),
            "New Shoes",
            "Shopping",
            "Nike Store",
            dec!(189.99),
            Expense,
            "Credit Card",
            "Running shoes - Training shoes",
        ),
        demo_transaction(
            date!(2025 - 10 - 12),
            "Freelance Project",
            "Income",
            "Client Co",
            dec!(800.00),
            Income,
            "Bank Transfer",
            "Payment for project - Website work",
        ),
        demo_transaction(
            date!(2025 - 10 - 15),
            "Coffee",
            "Food & Dining",
            "Starbucks",
            dec!(5.50),
            Expense,
            "Cash",
            "Daily coffee - Morning coffee",
        ),
        demo_transaction(
            date!(2025 - 10 - 18),
            "Gym Membership",
            "Health & Fitness",
            "Local Gym",
            dec!(49.99),
            Expense,
            "Credit Card",
            "Monthly membership - October membership",
        ),
        demo_transaction(
            date!(2025 - 10 - 20),
            "Stock Dividend",
            "Investment",
            "Brokerage",
            dec!(60.00),
            Income,
            "Direct Deposit",
            "Quarterly dividend - Stock XYZ dividend",
        ),
        demo_transaction(
            date!(2025 - 10 - 22),
            "Taxi",
            "Transportation",
            "City Cabs",
            dec!(32.25),
            Expense,
            "Credit Card",
            "Ride to airport - Late night ride",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn demo_transaction(
    date: Date,
    description: &str,
    category: &str,
    merchant: &str,
    amount: Decimal,
    transaction_type: TransactionType,
    payment_method: &str,
    notes: &str,
) -> TransactionData {
    TransactionData {
        date,
        description: description.to_owned(),
        category: category.to_owned(),
        merchant: merchant.to_owned(),
        amount,
        transaction_type,
        payment_method: Some(payment_method.to_owned()),
        notes: notes.to_owned(),
    }
}

#[cfg(test)]
mod seed_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        db::initialize,
        models::TransactionType,
        stores::{TransactionStore, sqlite::SQLiteTransactionStore},
    };

    use super::seed_demo_data;

    fn get_test_store() -> SQLiteTransactionStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn seeds_ten_transactions_into_an_empty_store() {
        let mut store = get_test_store();

        let row_count = seed_demo_data(&mut store).unwrap();

        assert_eq!(row_count, 10);
        assert_eq!(store.count().unwrap(), 10);
    }

    #[test]
    fn seeded_transactions_list_newest_first() {
        let mut store = get_test_store();
        seed_demo_data(&mut store).unwrap();

        let transactions = store.get_all().unwrap();

        assert_eq!(transactions.len(), 10);

        let first = &transactions[0];
        assert_eq!(first.date, date!(2025 - 10 - 22));
        assert_eq!(first.description, "Taxi");
        assert_eq!(first.amount, dec!(32.25));
        assert_eq!(first.transaction_type, TransactionType::Expense);

        let last = &transactions[9];
        assert_eq!(last.date, date!(2025 - 10 - 01));
        assert_eq!(last.description, "Salary");
        assert_eq!(last.amount, dec!(3500.00));
        assert_eq!(last.transaction_type, TransactionType::Income);
    }

    #[test]
    fn seeded_store_has_three_income_transactions() {
        let mut store = get_test_store();
        seed_demo_data(&mut store).unwrap();

        let income = store.get_by_type(TransactionType::Income).unwrap();

        let mut descriptions: Vec<&str> = income
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        descriptions.sort_unstable();
        assert_eq!(
            descriptions,
            vec!["Freelance Project", "Salary", "Stock Dividend"]
        );
    }

    #[test]
    fn seeding_a_non_empty_store_is_a_no_op() {
        let mut store = get_test_store();
        seed_demo_data(&mut store).unwrap();

        let row_count = seed_demo_data(&mut store).unwrap();

        assert_eq!(row_count, 0);
        assert_eq!(store.count().unwrap(), 10);
    }
}
