use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    alert::{Alert, transactions_changed},
    store::TransactionStore,
    transaction::TransactionId,
};

/// A route handler for marking an expense as paid, responds with an alert.
pub async fn mark_paid_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match store.mark_paid(transaction_id).await {
        Ok(()) => transactions_changed(Alert::SuccessSimple {
            message: format!("Transaction ID {transaction_id} marked as paid!"),
        }),
        Err(error) => {
            tracing::error!("Could not mark transaction {transaction_id} as paid: {error}");
            error.into_alert_response()
        }
    }
}
