//! Parsing of user-entered money amounts.

/// The ways a user-entered amount can be invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    /// Nothing was entered.
    #[error("an amount is required")]
    Empty,

    /// The text is not a number, e.g. "twelve".
    #[error("\"{0}\" is not a number")]
    NotANumber(String),

    /// The text parsed to infinity or NaN, e.g. "inf".
    #[error("the amount must be a finite number")]
    NotFinite,

    /// Amounts are unsigned, the transaction type decides the direction.
    #[error("the amount {0} is negative, use the transaction type to record money going out")]
    Negative(f64),
}

/// Parse `text` as an amount of money.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns an [AmountError] if `text` is empty, not a number, not finite or
/// negative.
pub fn parse_amount(text: &str) -> Result<f64, AmountError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let amount = parse_finite(text)?;

    if amount < 0.0 {
        return Err(AmountError::Negative(amount));
    }

    Ok(amount)
}

/// Parse `text` as a finite number without checking the sign.
pub(crate) fn parse_finite(text: &str) -> Result<f64, AmountError> {
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| AmountError::NotANumber(text.to_owned()))?;

    if !amount.is_finite() {
        return Err(AmountError::NotFinite);
    }

    Ok(amount)
}
