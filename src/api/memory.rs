use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    api::{ApiError, TransactionApi},
    transaction::{
        NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionUpdate,
    },
};

const NOT_FOUND_MESSAGE: &str = "Transaction not found.";

#[derive(Debug, Default)]
struct Backend {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    failure: Option<ApiError>,
}

/// A backend that keeps its transactions in memory.
///
/// Behaves like the PHP backend: IDs are assigned in increasing order, the
/// list keeps insertion order and operations on unknown IDs are rejected.
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionApi {
    backend: Arc<Mutex<Backend>>,
    requests: Arc<AtomicUsize>,
}

impl InMemoryTransactionApi {
    /// Create a backend that already holds `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or_default();

        Self {
            backend: Arc::new(Mutex::new(Backend {
                transactions,
                next_id,
                failure: None,
            })),
            requests: Arc::default(),
        }
    }

    /// The number of requests served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Make the next request fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        if let Ok(mut backend) = self.backend.lock() {
            backend.failure = Some(error);
        }
    }

    /// Count the request and lock the collection, failing if a failure was
    /// queued with [InMemoryTransactionApi::fail_next].
    fn begin(&self) -> Result<MutexGuard<'_, Backend>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let mut backend = self.backend.lock().map_err(|error| {
            tracing::error!("in-memory backend lock is poisoned: {error}");
            ApiError::Rejected {
                message: Some("The backend is unavailable.".to_owned()),
            }
        })?;

        match backend.failure.take() {
            Some(error) => Err(error),
            None => Ok(backend),
        }
    }
}

impl Backend {
    fn get_mut(&mut self, id: TransactionId) -> Result<&mut Transaction, ApiError> {
        self.transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or_else(not_found)
    }
}

fn not_found() -> ApiError {
    ApiError::Rejected {
        message: Some(NOT_FOUND_MESSAGE.to_owned()),
    }
}

#[async_trait]
impl TransactionApi for InMemoryTransactionApi {
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.begin()?.transactions.clone())
    }

    async fn create(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        let mut backend = self.begin()?;
        backend.next_id += 1;
        let id = backend.next_id;
        backend
            .transactions
            .push(transaction.clone().into_transaction(id));

        Ok(())
    }

    async fn update(&self, update: &TransactionUpdate) -> Result<(), ApiError> {
        let mut backend = self.begin()?;
        let transaction = backend.get_mut(update.transaction_id)?;
        transaction.category = update.category.clone();
        transaction.amount = update.amount;
        transaction.date = update.date;

        Ok(())
    }

    async fn delete(&self, id: TransactionId) -> Result<(), ApiError> {
        let mut backend = self.begin()?;
        let count_before = backend.transactions.len();
        backend.transactions.retain(|transaction| transaction.id != id);

        if backend.transactions.len() == count_before {
            return Err(not_found());
        }

        Ok(())
    }

    async fn mark_paid(&self, id: TransactionId) -> Result<(), ApiError> {
        self.begin()?.get_mut(id)?.status = TransactionStatus::Paid;

        Ok(())
    }

    async fn set_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> Result<(), ApiError> {
        self.begin()?.get_mut(id)?.status = status;

        Ok(())
    }

    async fn erase_all(&self) -> Result<(), ApiError> {
        self.begin()?.transactions.clear();

        Ok(())
    }
}
