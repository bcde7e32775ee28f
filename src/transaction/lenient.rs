//! Deserializers for numbers that the backend may send as JSON strings.

use serde::{Deserialize, Deserializer, de::Error as _};

use crate::transaction::amount::parse_finite;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an integer ID from either `12` or `"12"`.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Integer(id) => Ok(id),
        NumberOrText::Float(id) if id.fract() == 0.0 => Ok(id as i64),
        NumberOrText::Float(id) => Err(D::Error::custom(format!(
            "expected an integer ID, got {id}"
        ))),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer ID, got \"{text}\""))),
    }
}

/// Deserialize an amount from either `50.5` or `"50.50"`.
///
/// Non-numeric text is an error rather than NaN.
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Integer(amount) => Ok(amount as f64),
        NumberOrText::Float(amount) => Ok(amount),
        NumberOrText::Text(text) => parse_finite(&text).map_err(D::Error::custom),
    }
}
