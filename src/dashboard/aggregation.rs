//! Totals derived from a snapshot.
//!
//! Everything here is recomputed from scratch for each render, nothing is
//! cached between snapshots.

use crate::transaction::Transaction;

/// The sums shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The sum of every income amount.
    pub total_income: f64,
    /// The sum of every expense amount, paid or not.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub remaining_balance: f64,
}

impl Totals {
    /// Sum `transactions` by type.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (total_income, total_expenses) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), transaction| {
                    if transaction.is_income() {
                        (income + transaction.amount, expenses)
                    } else {
                        (income, expenses + transaction.amount)
                    }
                });

        Self {
            total_income,
            total_expenses,
            remaining_balance: total_income - total_expenses,
        }
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label, exactly as entered.
    pub category: String,
    /// The sum of the expenses in the category.
    pub total: f64,
}

/// Sum expenses per category.
///
/// Categories are listed in the order they first appear in `transactions`.
/// Categories are compared exactly, so "Food" and "food" are separate.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions.iter().filter(|transaction| transaction.is_expense()) {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals
}
