//! Budget Tracker is a web app for keeping track of income and expenses.
//!
//! The transactions live in a separate REST backend. This library polls the
//! backend into a shared snapshot and serves HTML pages and htmx partials
//! rendered from that snapshot.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::{signal, sync::watch};

mod alert;
mod api;
mod app_state;
mod config;
mod dashboard;
mod endpoints;
mod error;
mod error_page;
mod history;
mod home;
mod html;
mod logging;
mod modal;
mod overview;
mod routing;
mod spending;
mod statistics;
mod store;
mod timezone;
mod transaction;

pub use api::{
    ApiError, Envelope, HttpTransactionApi, InMemoryTransactionApi, TransactionApi,
    mock_backend_router,
};
pub use app_state::AppState;
pub use config::{Config, DEFAULT_API_BASE_URL};
pub use dashboard::{CategoryTotal, Totals, expenses_by_category};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use statistics::TaskStatistics;
pub use store::{Snapshot, TransactionStore, spawn_poller};
pub use transaction::{
    AmountError, EditTransactionForm, FormField, NewTransaction, Transaction, TransactionForm,
    TransactionId, TransactionStatus, TransactionType, TransactionUpdate, UserId,
    ValidationError, format_date, is_visible, matches_category, parse_amount, parse_date,
    visible_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server and the poller to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`, `shutdown` is sent `true` to stop the poller.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>, shutdown: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }

    // The poller may have already stopped, in which case there is no receiver.
    let _ = shutdown.send(true);
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

#[cfg(test)]
mod test_utils;
