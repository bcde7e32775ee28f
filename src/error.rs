//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    api::ApiError,
    error_page::{InternalServerError, NotFoundError},
    transaction::{TransactionId, ValidationError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The submitted form was incomplete or invalid.
    ///
    /// No request is sent to the backend for an invalid form.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend could not be reached or rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested transaction is not in the latest snapshot.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A mark-as-unpaid request for the transaction has not finished yet.
    #[error("a request for transaction {0} is already in flight")]
    RequestInFlight(TransactionId),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Api(error) => {
                tracing::error!("could not load data from the transactions API: {error}");
                InternalServerError {
                    description: "Could not load transactions",
                    fix: "The transactions API is unavailable. Try again later.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Validation(error) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.to_string(),
                },
            ),
            Error::Api(ApiError::Rejected { message }) => (
                StatusCode::BAD_GATEWAY,
                Alert::ErrorSimple {
                    message: format!(
                        "Error: {}",
                        message.as_deref().unwrap_or("The request was rejected.")
                    ),
                },
            ),
            Error::Api(error) => {
                tracing::error!("request to the transactions API failed: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Could not reach the transactions API".to_owned(),
                        details: "Check that the backend is running and try again.".to_owned(),
                    },
                )
            }
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::ErrorSimple {
                    message: "Transaction not found!".to_owned(),
                },
            ),
            Error::RequestInFlight(_) => (
                StatusCode::CONFLICT,
                Alert::ErrorSimple {
                    message: "This transaction is already being updated, please wait.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        api::ApiError,
        test_utils::parse_html_fragment,
        transaction::{FormField, ValidationError},
    };

    use super::Error;

    async fn alert_text(error: Error) -> (StatusCode, String) {
        let response = error.into_alert_response();
        let status = response.status();
        let html = parse_html_fragment(response).await;

        (status, html.root_element().text().collect::<String>())
    }

    #[tokio::test]
    async fn validation_error_asks_to_fill_out_all_fields() {
        let (status, text) = alert_text(Error::Validation(ValidationError::MissingFields(vec![
            FormField::Category,
        ])))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.contains("Please fill out all fields."), "got {text}");
    }

    #[tokio::test]
    async fn rejected_request_shows_backend_message() {
        let (status, text) = alert_text(Error::Api(ApiError::Rejected {
            message: Some("Database is read only".to_owned()),
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(text.contains("Error: Database is read only"), "got {text}");
    }

    #[tokio::test]
    async fn not_found_says_transaction_not_found() {
        let (status, text) = alert_text(Error::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text.contains("Transaction not found!"), "got {text}");
    }

    #[tokio::test]
    async fn request_in_flight_is_a_conflict() {
        let (status, _) = alert_text(Error::RequestInFlight(1)).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }
}
