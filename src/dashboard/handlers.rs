//! Route handlers for the dashboard partials.

use axum::extract::{Query, State};
use maud::Markup;
use serde::Deserialize;

use crate::{
    dashboard::{
        Totals,
        view::{rows_view, totals_view},
    },
    store::TransactionStore,
    transaction::visible_transactions,
};

/// The query string of the rows partial.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Only list transactions whose category contains this text.
    pub search: Option<String>,
}

/// Renders the income, expense and balance totals of the latest snapshot.
pub async fn get_totals_partial(State(store): State<TransactionStore>) -> Markup {
    let snapshot = store.snapshot();

    totals_view(&Totals::from_transactions(&snapshot.transactions))
}

/// Renders the dashboard rows: unpaid expenses first, then income.
pub async fn get_transactions_partial(
    State(store): State<TransactionStore>,
    Query(query): Query<SearchQuery>,
) -> Markup {
    let snapshot = store.snapshot();
    let rows = visible_transactions(&snapshot.transactions, query.search.as_deref());

    rows_view(&snapshot, &rows)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        api::{ApiError, InMemoryTransactionApi},
        endpoints,
        test_utils::new_test_server,
        transaction::{NewTransaction, TransactionStatus, TransactionType},
    };

    fn sample_api() -> InMemoryTransactionApi {
        let paid_rent = {
            let mut transaction = NewTransaction::new(
                1,
                TransactionType::Expense,
                "Rent",
                400.0,
                date!(2024 - 01 - 02),
            )
            .into_transaction(3);
            transaction.status = TransactionStatus::Paid;
            transaction
        };

        InMemoryTransactionApi::with_transactions(vec![
            NewTransaction::new(
                1,
                TransactionType::Income,
                "Salary",
                1000.0,
                date!(2024 - 01 - 01),
            )
            .into_transaction(1),
            NewTransaction::new(
                1,
                TransactionType::Expense,
                "Food",
                50.5,
                date!(2024 - 01 - 03),
            )
            .into_transaction(2),
            paid_rent,
        ])
    }

    fn categories(text: &str) -> Vec<String> {
        let html = Html::parse_fragment(text);
        let selector = Selector::parse("tbody tr td:nth-child(3)").unwrap();

        html.select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn totals_include_paid_expenses() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server.get(endpoints::TOTALS_PARTIAL).await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("₱1,000.00"), "{text}");
        assert!(text.contains("₱450.50"), "{text}");
        assert!(text.contains("₱549.50"), "{text}");
    }

    #[tokio::test]
    async fn rows_hide_paid_expenses_and_list_expenses_first() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server.get(endpoints::TRANSACTIONS_PARTIAL).await;

        response.assert_status_ok();
        assert_eq!(categories(&response.text()), vec!["Food", "Salary"]);
    }

    #[tokio::test]
    async fn rows_filter_by_search() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .get(endpoints::TRANSACTIONS_PARTIAL)
            .add_query_param("search", "SAL")
            .await;

        assert_eq!(categories(&response.text()), vec!["Salary"]);
    }

    #[tokio::test]
    async fn only_unpaid_expenses_can_be_marked_paid() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server.get(endpoints::TRANSACTIONS_PARTIAL).await;

        let html = Html::parse_fragment(&response.text());
        let selector = Selector::parse("button[hx-post]").unwrap();
        let targets: Vec<_> = html
            .select(&selector)
            .filter_map(|button| button.value().attr("hx-post"))
            .collect();
        assert_eq!(targets, vec!["/api/transactions/2/paid"]);
    }

    #[tokio::test]
    async fn shows_empty_message_when_nothing_matches() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        store.refresh().await.unwrap();

        let response = server
            .get(endpoints::TRANSACTIONS_PARTIAL)
            .add_query_param("search", "Travel")
            .await;

        assert!(response.text().contains("No transactions found."));
    }

    #[tokio::test]
    async fn shows_loading_before_first_fetch() {
        let api = sample_api();
        let (server, _store) = new_test_server(&api);

        let response = server.get(endpoints::TRANSACTIONS_PARTIAL).await;

        assert!(response.text().contains("Loading..."));
    }

    #[tokio::test]
    async fn shows_error_when_first_fetch_fails() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        api.fail_next(ApiError::Status(500));
        assert!(store.refresh().await.is_err());

        let response = server.get(endpoints::TRANSACTIONS_PARTIAL).await;

        assert!(
            response
                .text()
                .contains("An error occurred while fetching transactions.")
        );
    }

    #[tokio::test]
    async fn shows_try_again_when_first_fetch_is_rejected() {
        let api = sample_api();
        let (server, store) = new_test_server(&api);
        api.fail_next(ApiError::Rejected { message: None });
        assert!(store.refresh().await.is_err());

        let response = server.get(endpoints::TRANSACTIONS_PARTIAL).await;

        assert!(
            response
                .text()
                .contains("Failed to fetch transactions. Please try again later.")
        );
    }
}
