//! The paid overview: expenses that have been paid, with a way to undo it.

use axum::{
    extract::{Path, State},
    response::Response,
};
use maud::{Markup, html};

use crate::{
    alert::{ALERT_CONTAINER, Alert, transactions_changed},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        category_label, format_currency,
    },
    store::{Snapshot, TransactionStore},
    transaction::{Transaction, TransactionId, TransactionStatus, format_date},
};

/// Renders every paid transaction in backend order.
pub async fn get_paid_partial(State(store): State<TransactionStore>) -> Markup {
    paid_view(&store.snapshot())
}

/// A route handler for marking a paid expense as unpaid, responds with an alert.
///
/// Only one request per transaction may be in flight, a second one is
/// rejected with a 409 status.
pub async fn mark_unpaid_endpoint(
    State(store): State<TransactionStore>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match store.mark_unpaid(transaction_id).await {
        Ok(()) => transactions_changed(Alert::SuccessSimple {
            message: format!("Transaction ID {transaction_id} marked as unpaid!"),
        }),
        Err(error) => {
            tracing::error!("Could not mark transaction {transaction_id} as unpaid: {error}");
            error.into_alert_response()
        }
    }
}

fn paid_view(snapshot: &Snapshot) -> Markup {
    let paid: Vec<&Transaction> = snapshot
        .transactions
        .iter()
        .filter(|transaction| transaction.status == TransactionStatus::Paid)
        .collect();

    if paid.is_empty() {
        return html! { p class="text-gray-500 dark:text-gray-400" { "No paid transactions." } };
    }

    html! {
        div class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in paid
                    {
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }
                            td class=(TABLE_CELL_STYLE) { (category_label(&transaction.category)) }
                            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if snapshot.is_pending(transaction.id) {
                                    span { "Loading..." }
                                } @else {
                                    button
                                        type="button"
                                        hx-post=(format_endpoint(endpoints::MARK_UNPAID, transaction.id))
                                        hx-target=(ALERT_CONTAINER)
                                        hx-target-error=(ALERT_CONTAINER)
                                        hx-disabled-elt="this"
                                        class=(BUTTON_DELETE_STYLE)
                                    {
                                        "Mark as Unpaid"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use axum::http::StatusCode;
    use scraper::{Html, Selector};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        api::{InMemoryTransactionApi, TransactionApi},
        endpoints::{self, format_endpoint},
        store::Snapshot,
        test_utils::{assert_hx_trigger, new_test_server},
        transaction::{NewTransaction, Transaction, TransactionStatus, TransactionType},
    };

    use super::paid_view;

    fn paid_expense(id: i64, category: &str) -> Transaction {
        let mut transaction = NewTransaction::new(
            1,
            TransactionType::Expense,
            category,
            25.0,
            date!(2024 - 02 - 01),
        )
        .into_transaction(id);
        transaction.status = TransactionStatus::Paid;
        transaction
    }

    fn cell_text(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn lists_only_paid_transactions() {
        let unpaid = NewTransaction::new(
            1,
            TransactionType::Expense,
            "Rent",
            400.0,
            date!(2024 - 02 - 01),
        )
        .into_transaction(2);
        let snapshot = Snapshot {
            transactions: vec![paid_expense(1, "Food"), unpaid, paid_expense(3, "Gas")],
            fetched_at: Some(OffsetDateTime::UNIX_EPOCH),
            ..Default::default()
        };

        let html = Html::parse_fragment(&paid_view(&snapshot).into_string());

        assert_eq!(cell_text(&html, "tbody td:nth-child(3)"), vec!["Food", "Gas"]);
    }

    #[test]
    fn pending_rows_show_loading_instead_of_button() {
        let snapshot = Snapshot {
            transactions: vec![paid_expense(1, "Food"), paid_expense(2, "Gas")],
            fetched_at: Some(OffsetDateTime::UNIX_EPOCH),
            pending: BTreeSet::from([1]),
            ..Default::default()
        };

        let html = Html::parse_fragment(&paid_view(&snapshot).into_string());

        assert_eq!(
            cell_text(&html, "tbody td:nth-child(5)"),
            vec!["Loading...", "Mark as Unpaid"]
        );
        let buttons: Vec<_> = html
            .select(&Selector::parse("button").unwrap())
            .filter_map(|button| button.value().attr("hx-post"))
            .collect();
        assert_eq!(buttons, vec!["/api/transactions/2/unpaid"]);
    }

    #[tokio::test]
    async fn marks_transaction_as_unpaid() {
        let api = InMemoryTransactionApi::with_transactions(vec![paid_expense(4, "Food")]);
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .post(&format_endpoint(endpoints::MARK_UNPAID, 4))
            .await;

        response.assert_status_ok();
        assert_hx_trigger(&response);
        assert_eq!(
            api.list().await.unwrap()[0].status,
            TransactionStatus::Unpaid
        );
        assert!(store.snapshot().pending.is_empty());

        let partial = server.get(endpoints::PAID_PARTIAL).await;
        assert!(partial.text().contains("No paid transactions."));
    }

    #[tokio::test]
    async fn unknown_transaction_is_an_error_alert() {
        let api = InMemoryTransactionApi::default();
        let (server, _store) = new_test_server(&api);

        let response = server
            .post(&format_endpoint(endpoints::MARK_UNPAID, 9))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(response.text().contains("Transaction not found."));
    }
}
