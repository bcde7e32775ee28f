//! The transaction model shared by the store, the backend client and the views.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::transaction::lenient;

/// Alias for the integer type the backend uses for transaction IDs.
pub type TransactionId = i64;

/// Alias for the integer type the backend uses for user IDs.
pub type UserId = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent or owed.
    Expense,
}

impl TransactionType {
    /// The label shown in tables, e.g. "Income".
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// The payment lifecycle of a transaction.
///
/// Income is `Received` from the moment it is recorded. Expenses start as
/// `Unpaid` and move between `Unpaid` and `Paid`. `Completed` is only ever
/// reported by the backend and is never set by this application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Income that has been received.
    Received,
    /// An expense that still has to be paid.
    Unpaid,
    /// An expense that has been paid.
    Paid,
    /// A task-style status reported by the backend.
    Completed,
    /// Any status this application does not know about.
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    /// The status a new transaction of `transaction_type` starts with.
    pub fn default_for(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Income => TransactionStatus::Received,
            TransactionType::Expense => TransactionStatus::Unpaid,
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransactionStatus::Received => "received",
            TransactionStatus::Unpaid => "unpaid",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Unknown => "unknown",
        };

        write!(f, "{text}")
    }
}

/// A transaction as reported by the backend.
///
/// The backend may encode numbers as JSON strings, so IDs and amounts are
/// decoded leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID assigned by the backend.
    #[serde(deserialize_with = "lenient::id")]
    pub id: TransactionId,
    /// The user the transaction belongs to.
    #[serde(default, deserialize_with = "lenient::id")]
    pub user_id: UserId,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text label, e.g. "Food".
    pub category: String,
    /// The amount of money, always reported as a positive number.
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: f64,
    /// The day the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Where the transaction is in its payment lifecycle.
    pub status: TransactionStatus,
}

impl Transaction {
    /// Whether this is an expense.
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Whether this is income.
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// The data sent to the backend to create a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The user the transaction belongs to.
    #[serde(deserialize_with = "lenient::id")]
    pub user_id: UserId,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text label, e.g. "Food".
    pub category: String,
    /// The amount of money.
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: f64,
    /// The day the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The initial status, see [TransactionStatus::default_for].
    pub status: TransactionStatus,
}

impl NewTransaction {
    /// Create a transaction with the default status for `transaction_type`.
    pub fn new(
        user_id: UserId,
        transaction_type: TransactionType,
        category: &str,
        amount: f64,
        date: Date,
    ) -> Self {
        Self {
            user_id,
            transaction_type,
            category: category.to_owned(),
            amount,
            date,
            status: TransactionStatus::default_for(transaction_type),
        }
    }

    /// Attach a backend-assigned `id`.
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            transaction_type: self.transaction_type,
            category: self.category,
            amount: self.amount,
            date: self.date,
            status: self.status,
        }
    }
}

/// The fields of a transaction that can be edited after it was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// The transaction to update.
    #[serde(deserialize_with = "lenient::id")]
    pub transaction_id: TransactionId,
    /// The new category.
    pub category: String,
    /// The new amount.
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: f64,
    /// The new date.
    #[serde(with = "iso_date")]
    pub date: Date,
}
