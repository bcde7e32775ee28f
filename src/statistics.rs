//! Task statistics: how many transactions the backend reports as completed.

use axum::extract::State;
use maud::{Markup, html};

use crate::{
    html::format_percent,
    store::TransactionStore,
    transaction::{Transaction, TransactionStatus},
};

/// Counts of completed and remaining transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaskStatistics {
    /// The number of transactions.
    pub total: usize,
    /// The number of transactions with the `completed` status.
    pub completed: usize,
    /// `total - completed`.
    pub remaining: usize,
    /// `completed / total`, or zero when there are no transactions.
    pub progress: f64,
}

impl TaskStatistics {
    /// Count the completed transactions in `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total = transactions.len();
        let completed = transactions
            .iter()
            .filter(|transaction| transaction.status == TransactionStatus::Completed)
            .count();

        let progress = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };

        Self {
            total,
            completed,
            remaining: total - completed,
            progress,
        }
    }
}

/// Renders the task statistics of the latest snapshot.
pub async fn get_statistics_partial(State(store): State<TransactionStore>) -> Markup {
    statistics_view(&TaskStatistics::from_transactions(
        &store.snapshot().transactions,
    ))
}

fn statistics_view(statistics: &TaskStatistics) -> Markup {
    let percent = format_percent(statistics.progress);

    html! {
        div class="mb-4"
        {
            p { "Total Tasks: " (statistics.total) }
            p { "Completed Tasks: " (statistics.completed) }
            p { "Remaining Tasks: " (statistics.remaining) }
        }

        div class="w-full h-4 mb-4 bg-gray-200 rounded-full dark:bg-gray-700"
        {
            div
                class="h-4 bg-green-500 rounded-full"
                role="progressbar"
                style={ "width: " (percent) }
            {}
        }

        p class="text-center" { (percent) " Completed" }
    }
}
