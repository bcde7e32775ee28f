//! The JSON shapes exchanged with the transactions backend.

use serde::{Deserialize, Serialize};

use crate::{
    api::ApiError,
    transaction::{Transaction, TransactionId, TransactionStatus, lenient},
};

/// Every backend response is wrapped in this envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the backend carried out the request.
    pub success: bool,
    /// A human readable explanation, usually only present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The transaction collection, only present for list requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl Envelope {
    /// A successful response with no payload.
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// A successful response to a list request.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            success: true,
            message: None,
            transactions: Some(transactions),
        }
    }

    /// A failed response explaining why.
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_owned()),
            transactions: None,
        }
    }

    /// Unwrap the transactions of a successful response.
    ///
    /// A successful response without a collection is treated as empty.
    ///
    /// # Errors
    /// Returns [ApiError::Rejected] if `success` is false.
    pub fn into_transactions(self) -> Result<Vec<Transaction>, ApiError> {
        self.into_result().map(|transactions| transactions.unwrap_or_default())
    }

    /// Check that the backend carried out the request.
    ///
    /// # Errors
    /// Returns [ApiError::Rejected] if `success` is false.
    pub fn into_result(self) -> Result<Option<Vec<Transaction>>, ApiError> {
        if self.success {
            Ok(self.transactions)
        } else {
            Err(ApiError::Rejected {
                message: self.message,
            })
        }
    }
}

/// The body of requests that target a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionIdPayload {
    /// The transaction to act on.
    #[serde(deserialize_with = "lenient::id")]
    pub transaction_id: TransactionId,
}

/// The body of a status change request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// The transaction to update.
    #[serde(deserialize_with = "lenient::id")]
    pub transaction_id: TransactionId,
    /// The new status.
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::ApiError;

    use super::Envelope;

    #[test]
    fn missing_collection_is_empty() {
        let envelope: Envelope = serde_json::from_value(json!({"success": true})).unwrap();

        assert_eq!(envelope.into_transactions(), Ok(vec![]));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected_with_message() {
        let envelope: Envelope =
            serde_json::from_value(json!({"success": false, "message": "Database down"})).unwrap();

        assert_eq!(
            envelope.into_transactions(),
            Err(ApiError::Rejected {
                message: Some("Database down".to_owned())
            })
        );
    }

    #[test]
    fn failure_serializes_without_transactions() {
        let value = serde_json::to_value(Envelope::failure("nope")).unwrap();

        assert_eq!(value, json!({"success": false, "message": "nope"}));
    }
}
