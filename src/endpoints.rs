//! The URIs served to the browser.
//!
//! For endpoints that take a parameter, e.g. '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The home page with every view.
pub const ROOT: &str = "/";

/// The dashboard totals (income, expenses and remaining balance).
pub const TOTALS_PARTIAL: &str = "/partials/totals";
/// The dashboard rows, accepts an optional `search` query parameter.
pub const TRANSACTIONS_PARTIAL: &str = "/partials/transactions";
/// The paid overview.
pub const PAID_PARTIAL: &str = "/partials/paid";
/// The spending analysis.
pub const SPENDING_PARTIAL: &str = "/partials/spending";
/// The task statistics.
pub const STATISTICS_PARTIAL: &str = "/partials/statistics";
/// The transaction history.
pub const HISTORY_PARTIAL: &str = "/partials/history";

/// The dialog for editing a transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The dialog asking to confirm erasing every transaction.
pub const ERASE_CONFIRM_VIEW: &str = "/transactions/erase";
/// Responds with an empty dialog container.
pub const CLOSE_MODAL: &str = "/modal/close";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to mark an expense as paid.
pub const MARK_PAID: &str = "/api/transactions/{transaction_id}/paid";
/// The route to mark an expense as unpaid.
pub const MARK_UNPAID: &str = "/api/transactions/{transaction_id}/unpaid";
/// The route to erase every transaction.
pub const ERASE_ALL: &str = "/api/transactions/erase";

/// The htmx event sent with every successful mutation, views listen for it
/// on `body` and refresh immediately.
pub const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{transaction_id}' in '/api/transactions/{transaction_id}'. Only the first
/// parameter is replaced.
///
/// If no parameter is found `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end..])
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::TOTALS_PARTIAL,
            endpoints::TRANSACTIONS_PARTIAL,
            endpoints::PAID_PARTIAL,
            endpoints::SPENDING_PARTIAL,
            endpoints::STATISTICS_PARTIAL,
            endpoints::HISTORY_PARTIAL,
            endpoints::EDIT_TRANSACTION_VIEW,
            endpoints::ERASE_CONFIRM_VIEW,
            endpoints::CLOSE_MODAL,
            endpoints::TRANSACTIONS_API,
            endpoints::TRANSACTION,
            endpoints::MARK_PAID,
            endpoints::MARK_UNPAID,
            endpoints::ERASE_ALL,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }

    #[test]
    fn replaces_parameter_at_end() {
        let formatted_path = format_endpoint(endpoints::TRANSACTION, 12);

        assert_eq!(formatted_path, "/api/transactions/12");
        assert_endpoint_is_valid_uri(&formatted_path);
    }

    #[test]
    fn replaces_parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::MARK_PAID, 3);

        assert_eq!(formatted_path, "/api/transactions/3/paid");
        assert_endpoint_is_valid_uri(&formatted_path);
    }

    #[test]
    fn returns_path_unchanged_without_parameter() {
        assert_eq!(
            format_endpoint(endpoints::ERASE_ALL, 1),
            endpoints::ERASE_ALL
        );
    }
}
