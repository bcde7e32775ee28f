//! Spending analysis: income and expense totals and where the money went.

use axum::extract::State;
use maud::{Markup, html};

use crate::{
    dashboard::{CategoryTotal, Totals, expenses_by_category},
    html::{EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, category_label, format_currency},
    store::TransactionStore,
};

/// Renders the spending analysis of the latest snapshot.
pub async fn get_spending_partial(State(store): State<TransactionStore>) -> Markup {
    let snapshot = store.snapshot();
    let totals = Totals::from_transactions(&snapshot.transactions);
    let categories = expenses_by_category(&snapshot.transactions);

    spending_view(&totals, &categories)
}

fn spending_view(totals: &Totals, categories: &[CategoryTotal]) -> Markup {
    html! {
        div class="flex flex-col gap-4"
        {
            div
            {
                h3 class="text-lg font-medium" { "Total Income" }
                p class={ "text-xl font-bold " (INCOME_TEXT_STYLE) } { (format_currency(totals.total_income)) }
            }

            div
            {
                h3 class="text-lg font-medium" { "Total Expense" }
                p class={ "text-xl font-bold " (EXPENSE_TEXT_STYLE) } { (format_currency(totals.total_expenses)) }
            }

            div
            {
                h3 class="text-lg font-medium" { "Expenses by Category" }

                @if categories.is_empty() {
                    p class="text-gray-500 dark:text-gray-400" { "No expenses yet." }
                } @else {
                    ul class="pl-5 list-disc"
                    {
                        @for category in categories {
                            li
                            {
                                (category_label(&category.category)) ": " (format_currency(category.total))
                            }
                        }
                    }
                }
            }
        }
    }
}
