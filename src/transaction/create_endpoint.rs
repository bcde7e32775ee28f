use axum::{extract::State, response::Response};
use axum_extra::extract::Form;

use crate::{
    Error,
    alert::{Alert, transactions_changed},
    store::TransactionStore,
    transaction::TransactionForm,
};

/// A route handler for adding a transaction, responds with an alert.
///
/// An incomplete or invalid form is rejected without contacting the backend.
pub async fn create_transaction_endpoint(
    State(store): State<TransactionStore>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate(store.user_id()) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected transaction form {form:?}: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    match store.add(&transaction).await {
        Ok(()) => transactions_changed(Alert::SuccessSimple {
            message: "Transaction added successfully!".to_owned(),
        }),
        Err(error) => {
            tracing::error!("Could not add transaction: {error}");
            error.into_alert_response()
        }
    }
}
