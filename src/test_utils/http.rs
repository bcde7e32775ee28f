use std::{sync::Arc, time::Duration};

use axum_test::{TestResponse, TestServer};

use crate::{
    AppState, api::InMemoryTransactionApi, build_router, endpoints::TRANSACTIONS_CHANGED_EVENT,
    store::TransactionStore,
};

/// Serve the app over `api`.
///
/// Nothing polls the backend, call [TransactionStore::refresh] on the
/// returned store to load the snapshot.
pub(crate) fn new_test_server(api: &InMemoryTransactionApi) -> (TestServer, TransactionStore) {
    let store = TransactionStore::new(Arc::new(api.clone()), 1);
    let state = AppState::new(store.clone(), "Etc/UTC", Duration::from_secs(2));
    let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

    (server, store)
}

#[track_caller]
pub(crate) fn assert_hx_trigger(response: &TestResponse) {
    let header = response
        .headers()
        .get("hx-trigger")
        .expect("Headers missing hx-trigger")
        .to_str()
        .expect("Could not convert to str");

    assert_eq!(header, TRANSACTIONS_CHANGED_EVENT);
}
