//! Transactions and the endpoints that change them.
//!
//! This module contains:
//! - The [Transaction] model and the shapes sent to the backend
//! - Parsing and validation of the add and edit forms
//! - The rules for which transactions the dashboard lists
//! - Route handlers for adding, editing, deleting and paying transactions

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod filters;
mod form;
pub(crate) mod lenient;
mod mark_paid_endpoint;

pub use amount::{AmountError, parse_amount};
pub use self::core::{
    NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionType,
    TransactionUpdate, UserId,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use filters::{is_visible, matches_category, visible_transactions};
pub use form::{
    EditTransactionForm, FormField, TransactionForm, ValidationError, format_date, parse_date,
};
pub use mark_paid_endpoint::mark_paid_endpoint;
