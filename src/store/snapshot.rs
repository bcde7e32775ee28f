use std::collections::BTreeSet;

use time::OffsetDateTime;

use crate::{
    api::ApiError,
    transaction::{Transaction, TransactionId},
};

/// The latest known state of the remote transaction collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// The collection in the order the backend listed it.
    pub transactions: Vec<Transaction>,
    /// When the last successful fetch completed, `None` until the first one.
    pub fetched_at: Option<OffsetDateTime>,
    /// Why the most recent fetch failed, cleared by the next successful one.
    pub last_error: Option<ApiError>,
    /// Transactions with a mark-as-unpaid request in flight.
    pub pending: BTreeSet<TransactionId>,
    /// Incremented every time subscribers are notified.
    pub revision: u64,
    /// The ticket of the last change applied to this snapshot.
    pub(crate) ticket: u64,
}

impl Snapshot {
    /// Whether at least one fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }

    /// Find the transaction with `id`.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Whether a mark-as-unpaid request for `id` is in flight.
    pub fn is_pending(&self, id: TransactionId) -> bool {
        self.pending.contains(&id)
    }
}
