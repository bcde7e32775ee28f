//! Serves an [InMemoryTransactionApi] over the same HTTP contract as the PHP
//! backend, for manual testing and for testing [super::HttpTransactionApi].

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    api::{
        ApiError, Envelope, InMemoryTransactionApi, StatusPayload, TransactionApi,
        TransactionIdPayload,
        http::{
            CREATE_PATH, DELETE_PATH, ERASE_ALL_PATH, LIST_PATH, MARK_PAID_PATH,
            UPDATE_PATH, UPDATE_STATUS_PATH,
        },
    },
    transaction::{NewTransaction, TransactionUpdate},
};

/// Build a router answering the backend's endpoints from `backend`.
pub fn mock_backend_router(backend: InMemoryTransactionApi) -> Router {
    Router::new()
        .route(&format!("/{LIST_PATH}"), get(list))
        .route(&format!("/{CREATE_PATH}"), post(create))
        .route(&format!("/{UPDATE_PATH}"), post(update))
        .route(&format!("/{DELETE_PATH}"), post(delete))
        .route(&format!("/{MARK_PAID_PATH}"), post(mark_paid))
        .route(&format!("/{UPDATE_STATUS_PATH}"), post(update_status))
        .route(&format!("/{ERASE_ALL_PATH}"), post(erase_all))
        .with_state(backend)
}

fn envelope(result: Result<(), ApiError>) -> Json<Envelope> {
    match result {
        Ok(()) => Json(Envelope::success()),
        Err(ApiError::Rejected { message }) => Json(Envelope {
            success: false,
            message,
            transactions: None,
        }),
        Err(error) => Json(Envelope::failure(&error.to_string())),
    }
}

async fn list(State(backend): State<InMemoryTransactionApi>) -> Json<Envelope> {
    match backend.list().await {
        Ok(transactions) => Json(Envelope::with_transactions(transactions)),
        Err(error) => envelope(Err(error)),
    }
}

async fn create(
    State(backend): State<InMemoryTransactionApi>,
    Json(transaction): Json<NewTransaction>,
) -> Json<Envelope> {
    tracing::debug!("creating {transaction:?}");
    envelope(backend.create(&transaction).await)
}

async fn update(
    State(backend): State<InMemoryTransactionApi>,
    Json(update): Json<TransactionUpdate>,
) -> Json<Envelope> {
    envelope(backend.update(&update).await)
}

async fn delete(
    State(backend): State<InMemoryTransactionApi>,
    Json(payload): Json<TransactionIdPayload>,
) -> Json<Envelope> {
    envelope(backend.delete(payload.transaction_id).await)
}

async fn mark_paid(
    State(backend): State<InMemoryTransactionApi>,
    Json(payload): Json<TransactionIdPayload>,
) -> Json<Envelope> {
    envelope(backend.mark_paid(payload.transaction_id).await)
}

async fn update_status(
    State(backend): State<InMemoryTransactionApi>,
    Json(payload): Json<StatusPayload>,
) -> Json<Envelope> {
    envelope(
        backend
            .set_status(payload.transaction_id, payload.status)
            .await,
    )
}

async fn erase_all(State(backend): State<InMemoryTransactionApi>) -> Json<Envelope> {
    envelope(backend.erase_all().await)
}
