//! The transaction history: every transaction in the order the backend lists them.

use axum::extract::State;
use maud::{Markup, html};

use crate::{
    dashboard::fetch_error_message,
    html::{amount_style, category_label, format_currency},
    store::{Snapshot, TransactionStore},
    transaction::format_date,
};

/// Renders the full history of the latest snapshot.
pub async fn get_history_partial(State(store): State<TransactionStore>) -> Markup {
    history_view(&store.snapshot())
}

fn history_view(snapshot: &Snapshot) -> Markup {
    html! {
        @if let Some(error) = &snapshot.last_error {
            div class="p-4 mb-4 text-red-700 bg-red-100 rounded dark:bg-gray-800 dark:text-red-400" role="alert"
            {
                (fetch_error_message(error))
            }
        }

        @if snapshot.transactions.is_empty() {
            p class="text-gray-500 dark:text-gray-400" { "No transactions found." }
        } @else {
            ul class="flex flex-col gap-2"
            {
                @for transaction in &snapshot.transactions {
                    @let background = if transaction.is_income() {
                        "bg-green-50 dark:bg-gray-700"
                    } else {
                        "bg-red-50 dark:bg-gray-700"
                    };

                    li class={ "flex items-center justify-between p-3 rounded shadow-sm " (background) }
                    {
                        div
                        {
                            strong class="block text-gray-700 dark:text-gray-200"
                            {
                                (category_label(&transaction.category))
                            }
                            span class="text-sm text-gray-400" { (format_date(transaction.date)) }
                        }

                        div class={ "text-lg font-bold " (amount_style(transaction.is_expense())) }
                        {
                            (format_currency(transaction.amount))
                        }
                    }
                }
            }
        }
    }
}
