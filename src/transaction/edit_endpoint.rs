use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use axum_extra::extract::Form;
use maud::html;

use crate::{
    Error,
    alert::{Alert, transactions_changed},
    store::TransactionStore,
    transaction::{EditTransactionForm, TransactionId},
};

/// A route handler for updating a transaction from the edit dialog.
///
/// On success responds with an alert and closes the dialog with an
/// out-of-band swap.
pub async fn edit_transaction_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<EditTransactionForm>,
) -> Response {
    if store.snapshot().get(transaction_id).is_none() {
        return Error::NotFound.into_alert_response();
    }

    let update = match form.validate(transaction_id) {
        Ok(update) => update,
        Err(error) => return Error::from(error).into_alert_response(),
    };

    if let Err(error) = store.update(&update).await {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    let alert = Alert::SuccessSimple {
        message: "Transaction updated successfully!".to_owned(),
    }
    .into_html();
    let close_modal = html! { div id="modal-container" hx-swap-oob="true" {} };

    transactions_changed(Html(format!("{}{}", alert.0, close_modal.into_string())))
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

    fn food() -> InMemoryTransactionApi {
        InMemoryTransactionApi::with_transactions(vec![
            NewTransaction::new(
                1,
                TransactionType::Expense,
                "Food",
                10.0,
                date!(2024 - 01 - 01),
            )
            .into_transaction(1),
        ])
    }

    #[tokio::test]
    async fn updates_transaction_and_closes_dialog() {
        let api = food();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .form(&[
                ("category", "Groceries"),
                ("amount", "12.75"),
                ("date", "2024-01-02"),
            ])
            .await;

        response.assert_status_ok();
        assert_hx_trigger(&response);
        let text = response.text();
        assert!(text.contains("Transaction updated successfully!"));
        assert!(text.contains("hx-swap-oob"));

        let transaction = &api.list().await.unwrap()[0];
        assert_eq!(transaction.category, "Groceries");
        assert_eq!(transaction.amount, 12.75);
        assert_eq!(transaction.date, date!(2024 - 01 - 02));
        assert_eq!(store.snapshot().get(1).unwrap().category, "Groceries");
    }

    #[tokio::test]
    async fn unknown_transaction_is_not_found() {
        let api = food();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();
        let requests_before = api.request_count();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 2))
            .form(&[
                ("category", "Groceries"),
                ("amount", "1"),
                ("date", "2024-01-02"),
            ])
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Transaction not found!"));
        assert_eq!(api.request_count(), requests_before);
    }

    #[tokio::test]
    async fn empty_field_is_rejected() {
        let api = food();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .form(&[("category", "Groceries"), ("amount", ""), ("date", "2024-01-02")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Please fill out all fields."));
    }
}
