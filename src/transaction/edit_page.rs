use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    alert::ALERT_CONTAINER,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    modal::{MODAL_CONTAINER, modal_frame},
    store::TransactionStore,
    transaction::{Transaction, TransactionId, format_date},
};

/// Renders the dialog for editing a transaction, pre-filled from the latest
/// snapshot.
pub async fn get_edit_transaction_page(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let snapshot = store.snapshot();

    match snapshot.get(transaction_id) {
        Some(transaction) => Html(edit_transaction_view(transaction).into_string()).into_response(),
        None => {
            tracing::debug!("cannot edit transaction {transaction_id}, it is not in the snapshot");
            Error::NotFound.into_alert_response()
        }
    }
}

fn edit_transaction_view(transaction: &Transaction) -> Markup {
    let endpoint = format_endpoint(endpoints::TRANSACTION, transaction.id);

    modal_frame(html! {
        h2 class="mb-4 text-xl font-bold" { "Edit " (transaction.transaction_type.label()) }

        form
            hx-put=(endpoint)
            hx-target=(ALERT_CONTAINER)
            hx-target-error=(ALERT_CONTAINER)
            class="space-y-4"
        {
            div
            {
                label for="edit-category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    type="text"
                    name="category"
                    id="edit-category"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(transaction.category)
                    required;
            }

            div
            {
                label for="edit-amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="edit-amount"
                    min="0"
                    step="0.01"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(transaction.amount)
                    required;
            }

            div
            {
                label for="edit-date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="edit-date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(format_date(transaction.date))
                    required;
            }

            div class="flex gap-3"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }

                button
                    type="button"
                    hx-get=(endpoints::CLOSE_MODAL)
                    hx-target=(MODAL_CONTAINER)
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Cancel"
                }
            }
        }
    })
}
