//! The remote transactions API that owns persistence.
//!
//! This module contains:
//! - The [TransactionApi] trait that the store talks to
//! - [HttpTransactionApi], the client for the real backend
//! - [InMemoryTransactionApi], a backend kept in memory for demos and tests
//! - A router that serves an [InMemoryTransactionApi] over the backend's HTTP contract

use async_trait::async_trait;

use crate::transaction::{
    NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionUpdate,
};

mod envelope;
mod http;
mod memory;
mod mock_backend;

pub use envelope::{Envelope, StatusPayload, TransactionIdPayload};
pub use http::HttpTransactionApi;
pub use memory::InMemoryTransactionApi;
pub use mock_backend::mock_backend_router;

/// The errors that may occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("could not reach the transactions API: {0}")]
    Network(String),

    /// The backend answered with a non-success HTTP status code.
    #[error("the transactions API responded with HTTP status {0}")]
    Status(u16),

    /// The backend answered with `success: false`.
    #[error("{}", .message.as_deref().unwrap_or("the request was rejected by the transactions API"))]
    Rejected {
        /// The explanation given by the backend, if any.
        message: Option<String>,
    },

    /// The response body is not the expected JSON envelope.
    #[error("could not decode the response from the transactions API: {0}")]
    Decode(String),
}

/// The operations the backend offers on the transaction collection.
///
/// Every operation either succeeds or fails as a whole, the backend has no
/// partial updates.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Fetch the entire collection.
    async fn list(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Create a transaction, the backend assigns its ID.
    async fn create(&self, transaction: &NewTransaction) -> Result<(), ApiError>;

    /// Replace the category, amount and date of a transaction.
    async fn update(&self, update: &TransactionUpdate) -> Result<(), ApiError>;

    /// Delete a single transaction.
    async fn delete(&self, id: TransactionId) -> Result<(), ApiError>;

    /// Mark an expense as paid.
    async fn mark_paid(&self, id: TransactionId) -> Result<(), ApiError>;

    /// Set the status of a transaction, used to mark expenses as unpaid.
    async fn set_status(&self, id: TransactionId, status: TransactionStatus)
    -> Result<(), ApiError>;

    /// Delete every transaction.
    async fn erase_all(&self) -> Result<(), ApiError>;
}
