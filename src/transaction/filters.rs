//! The rules deciding which transactions the dashboard lists and in what order.

use crate::transaction::{Transaction, TransactionStatus, TransactionType};

/// Paid expenses are hidden from the dashboard list, everything else is shown.
pub fn is_visible(transaction: &Transaction) -> bool {
    transaction.transaction_type != TransactionType::Expense
        || transaction.status == TransactionStatus::Unpaid
}

/// Case-insensitive substring match of `search` against the category.
pub fn matches_category(transaction: &Transaction, search: &str) -> bool {
    transaction
        .category
        .to_lowercase()
        .contains(&search.to_lowercase())
}

/// Select and order the rows for the dashboard list.
///
/// When `search` is non-empty only categories containing it, exactly as
/// typed including any spaces, are kept. Paid
/// expenses are always dropped. Expenses are listed before income, and rows
/// of the same type keep the order they were given in.
pub fn visible_transactions<'a>(
    transactions: &'a [Transaction],
    search: Option<&str>,
) -> Vec<&'a Transaction> {
    let search = search.filter(|search| !search.is_empty());

    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| search.is_none_or(|search| matches_category(transaction, search)))
        .filter(|transaction| is_visible(transaction))
        .collect();

    // `sort_by_key` is stable, so ties keep their input order.
    rows.sort_by_key(|transaction| match transaction.transaction_type {
        TransactionType::Expense => 0,
        TransactionType::Income => 1,
    });

    rows
}
