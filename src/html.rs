use std::{sync::OnceLock, time::Duration};

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};
use unicode_segmentation::UnicodeSegmentation;

use crate::endpoints::TRANSACTIONS_CHANGED_EVENT;

/// The max number of graphemes to display for a category before truncating
/// and displaying ellipses.
const MAX_CATEGORY_GRAPHEMES: usize = 32;

/// Clears forms marked with `data-reset-on-success` after htmx submits them successfully.
const RESET_FORMS_SCRIPT: &str = r#"
document.addEventListener("htmx:afterRequest", (event) => {
    const form = event.detail.elt;
    if (event.detail.successful && form.matches("form[data-reset-on-success]")) {
        form.reset();
    }
});
"#;

/// The symbol every amount is shown with.
pub const CURRENCY_SYMBOL: &str = "₱";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 \
    dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700";

pub const BUTTON_DANGER_STYLE: &str = "py-2 px-4 text-sm font-medium text-white \
    bg-red-600 hover:bg-red-700 dark:bg-red-500 dark:hover:bg-red-600 rounded";

pub const BUTTON_LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline bg-transparent \
    border-none cursor-pointer disabled:text-gray-400";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page layout
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center gap-8 px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub const SECTION_STYLE: &str = "w-full max-w-5xl p-6 bg-white rounded-lg shadow \
    dark:bg-gray-800 dark:border dark:border-gray-700";

pub const SECTION_TITLE_STYLE: &str = "mb-4 text-xl font-bold tracking-tight";

// Amount colours
pub const INCOME_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
pub const EXPENSE_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

/// The text colour for an expense or income amount.
pub fn amount_style(is_expense: bool) -> &'static str {
    if is_expense {
        EXPENSE_TEXT_STYLE
    } else {
        INCOME_TEXT_STYLE
    }
}

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Budget Tracker" }

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.4" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.2" {}

                script
                {
                    (PreEscaped(RESET_FORMS_SCRIPT))
                }

                style
                {
                    r#"
                    #alert-container:empty {
                        display: none;
                    }
                    "#
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                div id="modal-container" {}

                // Alert container for swapping in error and success messages
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A container that loads `endpoint` when the page loads, then again every
/// `refresh_interval` and after every successful mutation.
///
/// `include` is a CSS selector of inputs sent along with each request.
pub fn polled_partial(
    id: &str,
    endpoint: &str,
    refresh_interval: Duration,
    include: Option<&str>,
) -> Markup {
    let trigger = format!(
        "load, every {}ms, {TRANSACTIONS_CHANGED_EVENT} from:body",
        refresh_interval.as_millis()
    );

    html! {
        div
            id=(id)
            hx-get=(endpoint)
            hx-trigger=(trigger)
            hx-include=[include]
            hx-swap="innerHTML"
        {
            p class="text-gray-500 dark:text-gray-400" { "Loading..." }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// Format `amount` with the currency symbol, thousands separators and two
/// decimal places, e.g. "₱1,234.50" or "-₱12.00".
pub fn format_currency(amount: f64) -> String {
    static FORMATTER: OnceLock<Option<Formatter>> = OnceLock::new();

    let cents = (amount * 100.0).round();
    let sign = if cents < 0.0 { "-" } else { "" };
    let magnitude = cents.abs() / 100.0;

    let formatter = FORMATTER.get_or_init(|| match Formatter::currency("") {
        Ok(formatter) => Some(formatter.precision(Precision::Decimals(2))),
        Err(error) => {
            tracing::error!("could not create currency formatter: {error:?}");
            None
        }
    });

    // numfmt switches to scientific notation for large numbers.
    let number = match formatter {
        Some(formatter) => Some(formatter.fmt_string(magnitude))
            .filter(|number| !number.contains(['e', 'E']))
            .map(|number| pad_cents(&number)),
        None => None,
    }
    .unwrap_or_else(|| group_thousands(&format!("{magnitude:.2}")));

    format!("{sign}{CURRENCY_SYMBOL}{number}")
}

/// Insert a comma between each group of three digits of the whole part of
/// `number`, e.g. "1234567.80" becomes "1,234,567.80".
fn group_thousands(number: &str) -> String {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{grouped}.{fraction}")
}

/// numfmt drops trailing zeros, e.g. "12.30" comes out as "12.3" and "12.00"
/// as "12", so the cents are padded back to two digits.
fn pad_cents(number: &str) -> String {
    match number.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = &fraction[..fraction.len().min(2)];
            format!("{whole}.{fraction:0<2}")
        }
        None => format!("{number}.00"),
    }
}

/// A category label, truncated with a tooltip showing the full text if it is
/// too long for a table cell.
pub fn category_label(category: &str) -> Markup {
    let (text, full_text) = truncate_category(category);

    html! {
        span title=[full_text] { (text) }
    }
}

fn truncate_category(category: &str) -> (String, Option<&str>) {
    if category.graphemes(true).count() <= MAX_CATEGORY_GRAPHEMES {
        return (category.to_owned(), None);
    }

    let truncated: String = category
        .graphemes(true)
        .take(MAX_CATEGORY_GRAPHEMES - 3)
        .collect();

    (truncated + "...", Some(category))
}

/// Format a fraction in [0, 1] as a whole percentage, e.g. "67%".
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}
