//! A dialog shown on top of the page, either a notice or a yes/no confirmation.
//!
//! Dialogs are swapped into the `#modal-container` element of the base page.
//! Closing a dialog swaps in the empty response of [close_modal].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_DANGER_STYLE, BUTTON_SECONDARY_STYLE},
};

/// The CSS selector of the element dialogs are swapped into.
pub const MODAL_CONTAINER: &str = "#modal-container";

/// The two kinds of dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// A message with a Close button.
    Notice {
        /// The message to show.
        message: String,
    },
    /// A question with Yes and No buttons.
    Confirm {
        /// The question to ask.
        message: String,
        /// The endpoint that is POSTed to when the user answers yes.
        confirm_endpoint: String,
    },
}

impl Modal {
    /// Render the dialog.
    pub fn into_html(self) -> Html<String> {
        let body = match &self {
            Modal::Notice { .. } => close_button("Close", BUTTON_SECONDARY_STYLE),
            Modal::Confirm {
                confirm_endpoint, ..
            } => html! {
                button
                    type="button"
                    hx-post=(confirm_endpoint)
                    hx-target=(MODAL_CONTAINER)
                    hx-disabled-elt="this"
                    class=(BUTTON_DANGER_STYLE)
                {
                    "Yes"
                }

                (close_button("No", BUTTON_SECONDARY_STYLE))
            },
        };

        let message = match self {
            Modal::Notice { message } | Modal::Confirm { message, .. } => message,
        };

        Html(dialog(&message, body).into_string())
    }
}

impl IntoResponse for Modal {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

fn close_button(label: &str, style: &str) -> Markup {
    html! {
        button
            type="button"
            hx-get=(endpoints::CLOSE_MODAL)
            hx-target=(MODAL_CONTAINER)
            class=(style)
        {
            (label)
        }
    }
}

/// Wrap `content` in the dialog overlay.
pub fn modal_frame(content: Markup) -> Markup {
    html! {
        div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50"
            role="dialog"
            aria-modal="true"
        {
            div class="w-full max-w-md p-6 bg-white rounded-lg shadow dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                (content)
            }
        }
    }
}

fn dialog(message: &str, buttons: Markup) -> Markup {
    modal_frame(html! {
        p class="mb-6 text-lg" { (message) }

        div class="flex justify-end gap-3" { (buttons) }
    })
}

/// Empties the dialog container.
pub async fn close_modal() -> Html<&'static str> {
    Html("")
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::Modal;

    fn buttons(html: &Html) -> Vec<(String, Option<String>, Option<String>)> {
        html.select(&Selector::parse("button").unwrap())
            .map(|button| {
                (
                    button.text().collect::<String>().trim().to_owned(),
                    button.value().attr("hx-post").map(str::to_owned),
                    button.value().attr("hx-get").map(str::to_owned),
                )
            })
            .collect()
    }

    #[test]
    fn notice_has_close_button() {
        let html = Html::parse_fragment(
            &Modal::Notice {
                message: "All transactions have been erased successfully!".to_owned(),
            }
            .into_html()
            .0,
        );

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("All transactions have been erased successfully!"));
        assert_eq!(
            buttons(&html),
            vec![(
                "Close".to_owned(),
                None,
                Some(endpoints::CLOSE_MODAL.to_owned())
            )]
        );
    }

    #[test]
    fn confirm_has_yes_and_no_buttons() {
        let html = Html::parse_fragment(
            &Modal::Confirm {
                message: "Are you sure?".to_owned(),
                confirm_endpoint: endpoints::ERASE_ALL.to_owned(),
            }
            .into_html()
            .0,
        );

        assert_eq!(
            buttons(&html),
            vec![
                (
                    "Yes".to_owned(),
                    Some(endpoints::ERASE_ALL.to_owned()),
                    None
                ),
                (
                    "No".to_owned(),
                    None,
                    Some(endpoints::CLOSE_MODAL.to_owned())
                ),
            ]
        );
    }
}
