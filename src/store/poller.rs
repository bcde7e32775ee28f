use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use crate::store::TransactionStore;

/// Refresh `store` every `period` until `shutdown` is set to true or its
/// sender is dropped.
///
/// The first refresh happens immediately. If a refresh takes longer than
/// `period`, the missed ticks are skipped rather than fired back to back.
pub fn spawn_poller(
    store: TransactionStore,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("polling transactions every {period:?}");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are recorded in the snapshot and logged by the store.
                    let _ = store.refresh().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("transaction poller stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use time::macros::date;
    use tokio::{sync::watch, time::timeout};

    use crate::{
        api::{ApiError, InMemoryTransactionApi},
        store::{TransactionStore, spawn_poller},
        transaction::{NewTransaction, TransactionType},
    };

    #[tokio::test]
    async fn polls_until_shutdown() {
        let api = InMemoryTransactionApi::with_transactions(vec![
            NewTransaction::new(
                1,
                TransactionType::Income,
                "Salary",
                100.0,
                date!(2024 - 01 - 01),
            )
            .into_transaction(1),
        ]);
        let store = TransactionStore::new(Arc::new(api.clone()), 1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_poller(store.clone(), Duration::from_millis(10), shutdown_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller did not stop")
            .unwrap();

        assert!(api.request_count() >= 2, "want at least two polls");
        assert_eq!(store.snapshot().transactions.len(), 1);

        let count_after_shutdown = api.request_count();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(api.request_count(), count_after_shutdown);
    }

    #[tokio::test]
    async fn keeps_polling_after_a_failure() {
        let api = InMemoryTransactionApi::default();
        api.fail_next(ApiError::Network("connection refused".to_owned()));
        let store = TransactionStore::new(Arc::new(api.clone()), 1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_poller(store.clone(), Duration::from_millis(10), shutdown_rx);
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(shutdown_tx);
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("poller did not stop")
            .unwrap();

        let snapshot = store.snapshot();
        assert!(snapshot.is_loaded());
        assert_eq!(snapshot.last_error, None);
    }
}
