//! Form data for adding and editing transactions, and its validation.
//!
//! Validation happens before anything is sent to the backend, so an invalid
//! form never causes a network request.

use std::fmt::{self, Display};

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{
    NewTransaction, TransactionId, TransactionType, TransactionUpdate, UserId,
    amount::{AmountError, parse_amount},
};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A required form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The category text input.
    Category,
    /// The amount number input.
    Amount,
    /// The date picker.
    Date,
}

impl Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Category => write!(f, "category"),
            FormField::Amount => write!(f, "amount"),
            FormField::Date => write!(f, "date"),
        }
    }
}

/// The reasons a transaction form can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were left empty.
    #[error("Please fill out all fields.")]
    MissingFields(Vec<FormField>),

    /// The amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// The date is not in the `YYYY-MM-DD` format produced by date pickers.
    #[error("\"{0}\" is not a valid date, expected a date like 2024-01-31")]
    InvalidDate(String),
}

/// The form data for creating a transaction.
///
/// Fields default to empty strings so that a missing field is reported as a
/// validation error instead of a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category label.
    #[serde(default)]
    pub category: String,
    /// The amount as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// The date as produced by the date picker.
    #[serde(default)]
    pub date: String,
}

impl TransactionForm {
    /// Check the form and turn it into a transaction for `user_id` with the
    /// default status for its type.
    ///
    /// # Errors
    /// Returns [ValidationError::MissingFields] if category, amount or date is
    /// empty, otherwise an error describing the first invalid field.
    pub fn validate(&self, user_id: UserId) -> Result<NewTransaction, ValidationError> {
        let fields = validate_fields(&self.category, &self.amount, &self.date)?;

        Ok(NewTransaction::new(
            user_id,
            self.transaction_type,
            &fields.category,
            fields.amount,
            fields.date,
        ))
    }
}

/// The form data for editing an existing transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct EditTransactionForm {
    /// The category label.
    #[serde(default)]
    pub category: String,
    /// The amount as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// The date as produced by the date picker.
    #[serde(default)]
    pub date: String,
}

impl EditTransactionForm {
    /// Check the form and turn it into an update for transaction `id`.
    ///
    /// # Errors
    /// Same rules as [TransactionForm::validate].
    pub fn validate(&self, id: TransactionId) -> Result<TransactionUpdate, ValidationError> {
        let fields = validate_fields(&self.category, &self.amount, &self.date)?;

        Ok(TransactionUpdate {
            transaction_id: id,
            category: fields.category,
            amount: fields.amount,
            date: fields.date,
        })
    }
}

struct ValidFields {
    category: String,
    amount: f64,
    date: Date,
}

fn validate_fields(
    category: &str,
    amount: &str,
    date: &str,
) -> Result<ValidFields, ValidationError> {
    let category = category.trim();
    let amount = amount.trim();
    let date = date.trim();

    let missing: Vec<FormField> = [
        (FormField::Category, category),
        (FormField::Amount, amount),
        (FormField::Date, date),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(ValidFields {
        category: category.to_owned(),
        amount: parse_amount(amount)?,
        date: parse_date(date)?,
    })
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [ValidationError::InvalidDate] if `text` is not a calendar date.
pub fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|error| {
        tracing::debug!("could not parse date {text:?}: {error}");
        ValidationError::InvalidDate(text.to_owned())
    })
}

/// Format `date` the way date pickers expect it.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format date {date:?}: {error}");
        date.to_string()
    })
}
