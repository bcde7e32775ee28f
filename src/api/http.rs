//! HTTP client for the PHP transactions backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::{
    api::{ApiError, Envelope, StatusPayload, TransactionApi, TransactionIdPayload},
    transaction::{NewTransaction, Transaction, TransactionId, TransactionStatus, TransactionUpdate},
};

/// Path of the endpoint listing every transaction.
pub const LIST_PATH: &str = "get_transactions.php";
/// Path of the endpoint creating a transaction.
pub const CREATE_PATH: &str = "add_transaction.php";
/// Path of the endpoint deleting a transaction.
pub const DELETE_PATH: &str = "delete_transact.php";
/// Path of the endpoint updating a transaction.
pub const UPDATE_PATH: &str = "update_transaction.php";
/// Path of the endpoint marking an expense as paid.
pub const MARK_PAID_PATH: &str = "mark_as_paid.php";
/// Path of the endpoint setting the status of a transaction.
pub const UPDATE_STATUS_PATH: &str = "update_status.php";
/// Path of the endpoint deleting every transaction.
pub const ERASE_ALL_PATH: &str = "erase_all_transactions.php";

/// Talks to the backend over HTTP, one request per operation.
#[derive(Debug, Clone)]
pub struct HttpTransactionApi {
    client: Client,
    base_url: String,
}

impl HttpTransactionApi {
    /// Create a client for the backend at `base_url`, e.g.
    /// "http://localhost/budget-tracker_backend/Backend/api".
    ///
    /// Requests that take longer than `timeout` fail with [ApiError::Network].
    ///
    /// # Errors
    /// Returns [ApiError::Network] if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Network(format!("could not create HTTP client: {error}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Envelope, ApiError> {
        let response = request.send().await.map_err(|error| {
            tracing::error!("request to {path} failed: {error}");
            ApiError::Network(error.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            tracing::error!("could not read response body from {path}: {error}");
            ApiError::Network(error.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("{path} responded with {status}");
            return Err(ApiError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|error| {
            tracing::error!("could not decode response from {path}: {error}");
            tracing::debug!("undecodable response body from {path}: {body:?}");
            ApiError::Decode(error.to_string())
        })
    }

    async fn post<T>(&self, path: &str, payload: &T) -> Result<(), ApiError>
    where
        T: Serialize + ?Sized,
    {
        let request = self.client.post(self.url(path)).json(payload);

        self.send(request, path).await?.into_result().map(|_| ())
    }
}

#[async_trait]
impl TransactionApi for HttpTransactionApi {
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        let request = self.client.get(self.url(LIST_PATH));

        self.send(request, LIST_PATH).await?.into_transactions()
    }

    async fn create(&self, transaction: &NewTransaction) -> Result<(), ApiError> {
        self.post(CREATE_PATH, transaction).await
    }

    async fn update(&self, update: &TransactionUpdate) -> Result<(), ApiError> {
        self.post(UPDATE_PATH, update).await
    }

    async fn delete(&self, id: TransactionId) -> Result<(), ApiError> {
        self.post(DELETE_PATH, &TransactionIdPayload { transaction_id: id })
            .await
    }

    async fn mark_paid(&self, id: TransactionId) -> Result<(), ApiError> {
        self.post(MARK_PAID_PATH, &TransactionIdPayload { transaction_id: id })
            .await
    }

    async fn set_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> Result<(), ApiError> {
        self.post(
            UPDATE_STATUS_PATH,
            &StatusPayload {
                transaction_id: id,
                status,
            },
        )
        .await
    }

    async fn erase_all(&self) -> Result<(), ApiError> {
        let request = self.client.post(self.url(ERASE_ALL_PATH));

        self.send(request, ERASE_ALL_PATH)
            .await?
            .into_result()
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, time::Duration};

    use axum::{Json, Router, http::StatusCode, routing::get};
    use time::macros::date;
    use tokio::net::TcpListener;

    use crate::{
        api::{
            ApiError, HttpTransactionApi, InMemoryTransactionApi, TransactionApi,
            mock_backend_router,
        },
        transaction::{NewTransaction, TransactionStatus, TransactionType, TransactionUpdate},
    };

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("could not bind test listener");
        let address = listener.local_addr().expect("could not get local address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("test server failed");
        });

        address
    }

    async fn client_for(router: Router) -> HttpTransactionApi {
        let address = serve(router).await;
        HttpTransactionApi::new(&format!("http://{address}/"), Duration::from_secs(5))
            .expect("could not create client")
    }

    #[tokio::test]
    async fn crud_round_trip_against_mock_backend() {
        let backend = InMemoryTransactionApi::default();
        let api = client_for(mock_backend_router(backend.clone())).await;

        api.create(&NewTransaction::new(
            1,
            TransactionType::Expense,
            "Food",
            50.0,
            date!(2024 - 01 - 01),
        ))
        .await
        .unwrap();

        let transactions = api.list().await.unwrap();
        assert_eq!(transactions.len(), 1);
        let id = transactions[0].id;
        assert_eq!(transactions[0].status, TransactionStatus::Unpaid);

        api.mark_paid(id).await.unwrap();
        assert_eq!(api.list().await.unwrap()[0].status, TransactionStatus::Paid);

        api.set_status(id, TransactionStatus::Unpaid).await.unwrap();
        assert_eq!(
            api.list().await.unwrap()[0].status,
            TransactionStatus::Unpaid
        );

        api.update(&TransactionUpdate {
            transaction_id: id,
            category: "Groceries".to_owned(),
            amount: 75.25,
            date: date!(2024 - 01 - 02),
        })
        .await
        .unwrap();
        let updated = &api.list().await.unwrap()[0];
        assert_eq!(updated.category, "Groceries");
        assert_eq!(updated.amount, 75.25);

        api.delete(id).await.unwrap();
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn erase_all_clears_backend() {
        let backend = InMemoryTransactionApi::default();
        for category in ["Rent", "Food"] {
            backend
                .create(&NewTransaction::new(
                    1,
                    TransactionType::Expense,
                    category,
                    1.0,
                    date!(2024 - 01 - 01),
                ))
                .await
                .unwrap();
        }
        let api = client_for(mock_backend_router(backend.clone())).await;

        api.erase_all().await.unwrap();

        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_request_carries_backend_message() {
        let api = client_for(mock_backend_router(InMemoryTransactionApi::default())).await;

        let result = api.delete(42).await;

        assert_eq!(
            result,
            Err(ApiError::Rejected {
                message: Some("Transaction not found.".to_owned())
            })
        );
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let router = Router::new().route(
            "/get_transactions.php",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let api = client_for(router).await;

        assert_eq!(api.list().await, Err(ApiError::Status(503)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let router = Router::new().route(
            "/get_transactions.php",
            get(|| async { Json(serde_json::json!({"transactions": "nope"})) }),
        );
        let api = client_for(router).await;

        let result = api.list().await;

        assert!(
            matches!(result, Err(ApiError::Decode(_))),
            "want decode error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let api = HttpTransactionApi::new("http://127.0.0.1:9", Duration::from_millis(500))
            .expect("could not create client");

        let result = api.list().await;

        assert!(
            matches!(result, Err(ApiError::Network(_))),
            "want network error, got {result:?}"
        );
    }

    #[test]
    fn trailing_slash_is_removed_from_base_url() {
        let api = HttpTransactionApi::new("http://localhost/api/", Duration::from_secs(1)).unwrap();

        assert_eq!(api.base_url(), "http://localhost/api");
    }
}
