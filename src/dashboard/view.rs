//! Markup for the dashboard: the add form, the totals and the rows.

use std::time::Duration;

use maud::{Markup, html};
use time::Date;

use crate::{
    alert::ALERT_CONTAINER,
    api::ApiError,
    dashboard::Totals,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_LINK_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        amount_style, category_label, format_currency, polled_partial,
    },
    modal::MODAL_CONTAINER,
    store::Snapshot,
    transaction::{Transaction, TransactionStatus, format_date},
};

const TOTALS_ID: &str = "dashboard-totals";
const ROWS_ID: &str = "dashboard-rows";
const SEARCH_ID: &str = "dashboard-search";

/// The message shown when the latest fetch failed.
///
/// A backend that answered without a usable list is told apart from one that
/// could not be reached.
pub(crate) fn fetch_error_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Rejected { .. } | ApiError::Decode(_) => {
            "Failed to fetch transactions. Please try again later."
        }
        ApiError::Network(_) | ApiError::Status(_) => {
            "An error occurred while fetching transactions."
        }
    }
}

/// The full dashboard, with the totals and rows loaded by htmx.
///
/// `today` is the default date of the add form.
pub(crate) fn dashboard_view(today: Date, refresh_interval: Duration) -> Markup {
    html! {
        div class="flex flex-col gap-6"
        {
            (polled_partial(TOTALS_ID, endpoints::TOTALS_PARTIAL, refresh_interval, None))

            (add_transaction_form(today))

            div
            {
                label for=(SEARCH_ID) class=(FORM_LABEL_STYLE) { "Search by category" }
                input
                    type="search"
                    name="search"
                    id=(SEARCH_ID)
                    placeholder="e.g. Food"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(endpoints::TRANSACTIONS_PARTIAL)
                    hx-trigger="input changed delay:300ms, search"
                    hx-target={ "#" (ROWS_ID) };
            }

            (polled_partial(
                ROWS_ID,
                endpoints::TRANSACTIONS_PARTIAL,
                refresh_interval,
                Some(&format!("#{SEARCH_ID}")),
            ))
        }
    }
}

fn add_transaction_form(today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target=(ALERT_CONTAINER)
            hx-target-error=(ALERT_CONTAINER)
            data-reset-on-success
            class="grid gap-4 md:grid-cols-5 items-end"
        {
            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="income" { "Income" }
                    option value="expense" selected { "Expense" }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                input
                    type="text"
                    name="category"
                    id="category"
                    placeholder="e.g. Food"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    min="0"
                    step="0.01"
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    value=(format_date(today))
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
        }
    }
}

pub(super) fn totals_view(totals: &Totals) -> Markup {
    let balance_style = amount_style(totals.remaining_balance < 0.0);

    html! {
        dl class="grid gap-4 sm:grid-cols-3"
        {
            (total_card("Total Income", &format_currency(totals.total_income), amount_style(false)))
            (total_card("Total Expenses", &format_currency(totals.total_expenses), amount_style(true)))
            (total_card("Remaining Balance", &format_currency(totals.remaining_balance), balance_style))
        }
    }
}

fn total_card(label: &str, value: &str, style: &str) -> Markup {
    html! {
        div class="p-4 rounded-lg bg-gray-50 dark:bg-gray-700"
        {
            dt class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            dd class={ "text-2xl font-semibold " (style) } { (value) }
        }
    }
}

pub(super) fn rows_view(snapshot: &Snapshot, rows: &[&Transaction]) -> Markup {
    if !snapshot.is_loaded() {
        return match &snapshot.last_error {
            Some(error) => html! {
                p class="text-red-600 dark:text-red-400" { (fetch_error_message(error)) }
            },
            None => html! { p class="text-gray-500 dark:text-gray-400" { "Loading..." } },
        };
    }

    if rows.is_empty() {
        return html! { p class="text-gray-500 dark:text-gray-400" { "No transactions found." } };
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
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in rows
                    {
                        (row_view(transaction))
                    }
                }
            }
        }
    }
}

fn row_view(transaction: &Transaction) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let transaction_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let mark_paid_url = format_endpoint(endpoints::MARK_PAID, transaction.id);
    let can_mark_paid =
        transaction.is_expense() && transaction.status == TransactionStatus::Unpaid;

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }
            td class=(TABLE_CELL_STYLE) { (category_label(&transaction.category)) }
            td class={ (TABLE_CELL_STYLE) " " (amount_style(transaction.is_expense())) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.status) }
            td class={ (TABLE_CELL_STYLE) " flex gap-4" }
            {
                button
                    type="button"
                    hx-get=(edit_url)
                    hx-target=(MODAL_CONTAINER)
                    hx-target-error=(ALERT_CONTAINER)
                    class=(BUTTON_LINK_STYLE)
                {
                    "Edit"
                }

                button
                    type="button"
                    hx-delete=(transaction_url)
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target=(ALERT_CONTAINER)
                    hx-target-error=(ALERT_CONTAINER)
                    hx-disabled-elt="this"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }

                @if can_mark_paid
                {
                    button
                        type="button"
                        hx-post=(mark_paid_url)
                        hx-target=(ALERT_CONTAINER)
                        hx-target-error=(ALERT_CONTAINER)
                        hx-disabled-elt="this"
                        class=(BUTTON_LINK_STYLE)
                    {
                        "Mark as Paid"
                    }
                }
            }
        }
    }
}
