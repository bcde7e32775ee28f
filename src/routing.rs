//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::{get_totals_partial, get_transactions_partial},
    endpoints,
    error_page::get_404_not_found,
    history::get_history_partial,
    home::{erase_all_endpoint, get_erase_confirm, get_home_page},
    logging::logging_middleware,
    modal::close_modal,
    overview::{get_paid_partial, mark_unpaid_endpoint},
    spending::get_spending_partial,
    statistics::get_statistics_partial,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, mark_paid_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let partials = Router::new()
        .route(endpoints::TOTALS_PARTIAL, get(get_totals_partial))
        .route(endpoints::TRANSACTIONS_PARTIAL, get(get_transactions_partial))
        .route(endpoints::PAID_PARTIAL, get(get_paid_partial))
        .route(endpoints::SPENDING_PARTIAL, get(get_spending_partial))
        .route(endpoints::STATISTICS_PARTIAL, get(get_statistics_partial))
        .route(endpoints::HISTORY_PARTIAL, get(get_history_partial));

    let dialogs = Router::new()
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::ERASE_CONFIRM_VIEW, get(get_erase_confirm))
        .route(endpoints::CLOSE_MODAL, get(close_modal));

    // The static erase route takes priority over the `{transaction_id}` capture.
    let api = Router::new()
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::MARK_PAID, post(mark_paid_endpoint))
        .route(endpoints::MARK_UNPAID, post(mark_unpaid_endpoint))
        .route(endpoints::ERASE_ALL, post(erase_all_endpoint));

    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .merge(partials)
        .merge(dialogs)
        .merge(api)
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_404_not_found)
        .with_state(state)
}
