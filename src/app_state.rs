//! Implements a struct that holds the state of the web server.

use std::time::Duration;

use axum::extract::FromRef;

use crate::{home::HomePageState, store::TransactionStore};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The shared snapshot of the backend's transactions.
    pub store: TransactionStore,

    /// How often the browser re-requests each view.
    pub refresh_interval: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] serving the views of `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Manila".
    pub fn new(store: TransactionStore, local_timezone: &str, refresh_interval: Duration) -> Self {
        Self {
            store,
            refresh_interval,
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl FromRef<AppState> for TransactionStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            refresh_interval: state.refresh_interval,
            local_timezone: state.local_timezone.clone(),
        }
    }
}
