//! Alerts for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page,
//! either as the target of a successful request or through
//! `hx-target-error` when a request fails.

use axum::response::{Html, IntoResponse, Response};
use axum_htmx::HX_TRIGGER;
use maud::{Markup, html};

use crate::endpoints::TRANSACTIONS_CHANGED_EVENT;

/// The CSS selector of the element alerts are swapped into.
pub const ALERT_CONTAINER: &str = "#alert-container";

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message without details.
    SuccessSimple {
        /// The message.
        message: String,
    },
    /// An error message with an explanation or a fix.
    Error {
        /// The headline.
        message: String,
        /// More detail shown below the headline.
        details: String,
    },
    /// An error message without details.
    ErrorSimple {
        /// The message.
        message: String,
    },
}

impl Alert {
    /// Render the alert.
    pub fn into_html(self) -> Html<String> {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        Html(alert_view(is_error, &message, details.as_deref()).into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

/// Respond with `body` and tell every view to refresh.
pub fn transactions_changed(body: impl IntoResponse) -> Response {
    ([(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)], body).into_response()
}

fn alert_view(is_error: bool, message: &str, details: Option<&str>) -> Markup {
    let style = if is_error {
        "text-red-800 bg-red-50 border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
    } else {
        "text-green-800 bg-green-50 border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
    };

    html! {
        div
            role="alert"
            class={ "flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg shadow " (style) }
        {
            div class="flex-1"
            {
                p class="font-medium" { (message) }

                @if let Some(details) = details.filter(|details| !details.is_empty())
                {
                    p class="mt-1" { (details) }
                }
            }

            button
                type="button"
                aria-label="Dismiss"
                class="font-bold cursor-pointer"
                onclick="this.closest('[role=alert]').remove()"
            {
                "×"
            }
        }
    }
}
