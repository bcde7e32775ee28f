//! The home page and the "Start Over" flow for erasing every transaction.

use std::time::Duration;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    alert::transactions_changed,
    api::ApiError,
    dashboard::dashboard_view,
    endpoints,
    html::{
        BUTTON_DANGER_STYLE, PAGE_CONTAINER_STYLE, SECTION_STYLE, SECTION_TITLE_STYLE, base,
        polled_partial,
    },
    modal::{MODAL_CONTAINER, Modal},
    store::TransactionStore,
    timezone::local_today,
};

/// The state needed to render the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    /// How often the browser re-requests each view.
    pub refresh_interval: Duration,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
}

/// Display the dashboard and every other view on one page.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the configured timezone is unknown.
pub async fn get_home_page(State(state): State<HomePageState>) -> Result<Markup, Error> {
    let today = local_today(&state.local_timezone)?;

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold text-gray-900 dark:text-white" { "Budget Tracker" }

            (section(
                "Transactions",
                html! {
                    div class="flex justify-end mb-4"
                    {
                        button
                            type="button"
                            hx-get=(endpoints::ERASE_CONFIRM_VIEW)
                            hx-target=(MODAL_CONTAINER)
                            class=(BUTTON_DANGER_STYLE)
                        {
                            "Start Over"
                        }
                    }

                    (dashboard_view(today, state.refresh_interval))
                },
            ))

            (section(
                "Paid Overview",
                polled_partial("paid-overview", endpoints::PAID_PARTIAL, state.refresh_interval, None),
            ))

            (section(
                "Spending Analysis",
                polled_partial("spending-analysis", endpoints::SPENDING_PARTIAL, state.refresh_interval, None),
            ))

            (section(
                "Task Statistics",
                polled_partial("task-statistics", endpoints::STATISTICS_PARTIAL, state.refresh_interval, None),
            ))

            (section(
                "Transaction History",
                polled_partial("transaction-history", endpoints::HISTORY_PARTIAL, state.refresh_interval, None),
            ))
        }
    };

    Ok(base("Home", &content))
}

fn section(title: &str, content: Markup) -> Markup {
    html! {
        section class=(SECTION_STYLE)
        {
            h2 class=(SECTION_TITLE_STYLE) { (title) }
            (content)
        }
    }
}

/// Ask the user to confirm erasing every transaction.
pub async fn get_erase_confirm() -> Modal {
    Modal::Confirm {
        message: "Are you sure you want to erase all transactions?".to_owned(),
        confirm_endpoint: endpoints::ERASE_ALL.to_owned(),
    }
}

/// Erase every transaction and replace the confirmation with a notice.
///
/// The notice is swapped into the dialog, so the response is always a 200.
pub async fn erase_all_endpoint(State(store): State<TransactionStore>) -> Response {
    match store.erase_all().await {
        Ok(()) => transactions_changed(Modal::Notice {
            message: "All transactions have been erased successfully!".to_owned(),
        }),
        Err(error) => {
            tracing::error!("Could not erase transactions: {error}");

            let message = match error {
                Error::Api(ApiError::Rejected {
                    message: Some(message),
                }) => format!("Error: {message}"),
                Error::Api(ApiError::Rejected { message: None } | ApiError::Decode(_)) => {
                    "Error: Failed to erase transactions.".to_owned()
                }
                _ => "An unexpected error occurred. Please try again.".to_owned(),
            };

            Modal::Notice { message }.into_response()
        }
    }
}
