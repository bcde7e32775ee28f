use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    alert::{Alert, transactions_changed},
    store::TransactionStore,
    transaction::TransactionId,
};

/// A route handler for deleting a transaction, responds with an alert.
///
/// The browser asks the user to confirm before sending the request.
pub async fn delete_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match store.delete(transaction_id).await {
        Ok(()) => transactions_changed(Alert::SuccessSimple {
            message: "Transaction deleted successfully!".to_owned(),
        }),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::date;

    use crate::{
        api::{InMemoryTransactionApi, TransactionApi},
        endpoints::{self, format_endpoint},
        test_utils::{assert_hx_trigger, new_test_server},
        transaction::{NewTransaction, TransactionType},
    };

    #[tokio::test]
    async fn deletes_transaction() {
        let api = InMemoryTransactionApi::with_transactions(vec![
            NewTransaction::new(
                1,
                TransactionType::Income,
                "Salary",
                100.0,
                date!(2024 - 01 - 01),
            )
            .into_transaction(4),
        ]);
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, 4))
            .await;

        response.assert_status_ok();
        assert_hx_trigger(&response);
        assert!(response.text().contains("Transaction deleted successfully!"));
        assert!(api.list().await.unwrap().is_empty());
        assert!(store.snapshot().transactions.is_empty());
    }

    #[tokio::test]
    async fn missing_transaction_shows_backend_message() {
        let (server, _) = new_test_server(&InMemoryTransactionApi::default());

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, 4))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(response.text().contains("Error: Transaction not found."));
    }
}
