//! The single owner of the transaction collection.
//!
//! Views never talk to the backend. They read the latest [Snapshot] from the
//! [TransactionStore], which is refreshed by one background poller and by the
//! mutations below.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use time::OffsetDateTime;
use tokio::sync::watch;

use crate::{
    Error,
    api::{ApiError, TransactionApi},
    transaction::{NewTransaction, TransactionId, TransactionStatus, TransactionUpdate, UserId},
};

mod poller;
mod snapshot;

pub use poller::spawn_poller;
pub use snapshot::Snapshot;

struct Inner {
    api: Arc<dyn TransactionApi>,
    user_id: UserId,
    snapshot: watch::Sender<Snapshot>,
    next_ticket: AtomicU64,
}

/// Shared handle to the transaction snapshot and the operations that change it.
///
/// Every fetch and every local patch takes a ticket before it starts. A
/// result is only applied if its ticket is at least as new as the ticket of
/// the last applied change, so a slow poll can never overwrite a newer
/// mutation.
#[derive(Clone)]
pub struct TransactionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("user_id", &self.inner.user_id)
            .field("revision", &self.inner.snapshot.borrow().revision)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Create a store backed by `api` that records new transactions for `user_id`.
    ///
    /// The snapshot starts empty, call [TransactionStore::refresh] or
    /// [spawn_poller] to load it.
    pub fn new(api: Arc<dyn TransactionApi>, user_id: UserId) -> Self {
        let (snapshot, _) = watch::channel(Snapshot::default());

        Self {
            inner: Arc::new(Inner {
                api,
                user_id,
                snapshot,
                next_ticket: AtomicU64::new(1),
            }),
        }
    }

    /// The user new transactions are recorded for.
    pub fn user_id(&self) -> UserId {
        self.inner.user_id
    }

    /// A copy of the latest snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// A receiver that is woken every time the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot.subscribe()
    }

    fn take_ticket(&self) -> u64 {
        self.inner.next_ticket.fetch_add(1, Ordering::SeqCst)
    }

    /// Apply `change` if `ticket` is not older than the last applied change.
    ///
    /// `change` returns whether it altered anything subscribers care about.
    fn apply<F>(&self, ticket: u64, change: F) -> bool
    where
        F: FnOnce(&mut Snapshot) -> bool,
    {
        self.inner.snapshot.send_if_modified(|snapshot| {
            if ticket < snapshot.ticket {
                tracing::debug!(
                    "discarding stale change with ticket {ticket}, snapshot is at ticket {}",
                    snapshot.ticket
                );
                return false;
            }

            snapshot.ticket = ticket;

            let modified = change(snapshot);
            if modified {
                snapshot.revision += 1;
            }

            modified
        })
    }

    /// Fetch the whole collection and replace the snapshot with it.
    ///
    /// On failure the previous transactions are kept and the error is
    /// recorded in [Snapshot::last_error]. Subscribers are only notified if
    /// the transactions or the error changed.
    ///
    /// # Errors
    /// Returns the [ApiError] from the fetch.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let ticket = self.take_ticket();
        let result = self.inner.api.list().await;

        match result {
            Ok(transactions) => {
                self.apply(ticket, |snapshot| {
                    snapshot.fetched_at = Some(OffsetDateTime::now_utc());

                    if snapshot.transactions == transactions && snapshot.last_error.is_none() {
                        return false;
                    }

                    snapshot.transactions = transactions;
                    snapshot.last_error = None;
                    true
                });

                Ok(())
            }
            Err(error) => {
                tracing::warn!("could not fetch transactions: {error}");
                self.apply(ticket, |snapshot| {
                    if snapshot.last_error.as_ref() == Some(&error) {
                        return false;
                    }

                    snapshot.last_error = Some(error.clone());
                    true
                });

                Err(error)
            }
        }
    }

    /// Refresh after a successful mutation.
    ///
    /// The mutation already succeeded, so a failed refresh is only logged
    /// and left for the poller to repair.
    async fn refresh_after(&self, action: &str) {
        if let Err(error) = self.refresh().await {
            tracing::warn!("could not refresh transactions after {action}: {error}");
        }
    }

    /// Create `transaction` and reload the collection.
    ///
    /// # Errors
    /// Returns [Error::Api] if the backend did not create the transaction.
    pub async fn add(&self, transaction: &NewTransaction) -> Result<(), Error> {
        self.inner.api.create(transaction).await?;
        tracing::info!(
            "created {} transaction in category {:?}",
            transaction.transaction_type,
            transaction.category
        );
        self.refresh_after("creating a transaction").await;

        Ok(())
    }

    /// Apply `update` and reload the collection.
    ///
    /// # Errors
    /// Returns [Error::Api] if the backend did not apply the update.
    pub async fn update(&self, update: &TransactionUpdate) -> Result<(), Error> {
        self.inner.api.update(update).await?;
        tracing::info!("updated transaction {}", update.transaction_id);
        self.refresh_after("updating a transaction").await;

        Ok(())
    }

    /// Delete transaction `id` and reload the collection.
    ///
    /// # Errors
    /// Returns [Error::Api] if the backend did not delete the transaction.
    pub async fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.inner.api.delete(id).await?;
        tracing::info!("deleted transaction {id}");
        self.refresh_after("deleting a transaction").await;

        Ok(())
    }

    /// Mark expense `id` as paid.
    ///
    /// The snapshot is patched in place instead of being reloaded.
    ///
    /// # Errors
    /// Returns [Error::Api] if the backend did not update the transaction.
    pub async fn mark_paid(&self, id: TransactionId) -> Result<(), Error> {
        self.inner.api.mark_paid(id).await?;
        tracing::info!("marked transaction {id} as paid");

        let ticket = self.take_ticket();
        self.apply(ticket, |snapshot| {
            match snapshot
                .transactions
                .iter_mut()
                .find(|transaction| transaction.id == id)
            {
                Some(transaction) if transaction.status != TransactionStatus::Paid => {
                    transaction.status = TransactionStatus::Paid;
                    true
                }
                _ => false,
            }
        });

        Ok(())
    }

    /// Mark expense `id` as unpaid again and reload the collection.
    ///
    /// While the request is in flight `id` is listed in [Snapshot::pending].
    ///
    /// # Errors
    /// Returns [Error::RequestInFlight] if a request for `id` is already in
    /// flight, or [Error::Api] if the backend did not update the transaction.
    pub async fn mark_unpaid(&self, id: TransactionId) -> Result<(), Error> {
        let mut inserted = false;
        self.inner.snapshot.send_if_modified(|snapshot| {
            inserted = snapshot.pending.insert(id);
            if inserted {
                snapshot.revision += 1;
            }
            inserted
        });

        if !inserted {
            tracing::debug!("rejecting mark-as-unpaid for transaction {id}, one is in flight");
            return Err(Error::RequestInFlight(id));
        }

        let _guard = PendingGuard { store: self, id };

        self.inner
            .api
            .set_status(id, TransactionStatus::Unpaid)
            .await?;
        tracing::info!("marked transaction {id} as unpaid");
        self.refresh_after("marking a transaction as unpaid").await;

        Ok(())
    }

    /// Delete every transaction and reload the collection.
    ///
    /// # Errors
    /// Returns [Error::Api] if the backend did not erase the transactions.
    pub async fn erase_all(&self) -> Result<(), Error> {
        self.inner.api.erase_all().await?;
        tracing::info!("erased all transactions");
        self.refresh_after("erasing all transactions").await;

        Ok(())
    }
}

/// Removes a transaction from [Snapshot::pending] when dropped, including
/// when the request future is cancelled.
struct PendingGuard<'a> {
    store: &'a TransactionStore,
    id: TransactionId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.store.inner.snapshot.send_if_modified(|snapshot| {
            let removed = snapshot.pending.remove(&self.id);
            if removed {
                snapshot.revision += 1;
            }
            removed
        });
    }
}
