//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, error_page::ErrorPage};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transactions API could not be reached, e.g. the connection was
    /// refused or the request timed out.
    ///
    /// The string is the underlying client error and should only be logged.
    #[error("could not reach the transactions API: {0}")]
    RemoteUnavailable(String),

    /// The transactions API responded with a non-success status code.
    #[error("the transactions API responded with status {0}")]
    RemoteStatus(u16),

    /// The transactions API responded with a body that could not be decoded.
    #[error("could not decode the response from the transactions API: {0}")]
    InvalidRemoteResponse(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The seed file for the development API could not be read or parsed.
    #[error("could not load the seed file: {0}")]
    InvalidSeedFile(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            error @ (Error::RemoteUnavailable(_)
            | Error::RemoteStatus(_)
            | Error::InvalidRemoteResponse(_)) => {
                tracing::error!("Could not load transactions: {error}");
                ErrorPage {
                    status: StatusCode::BAD_GATEWAY,
                    description: "Could not load your transactions.",
                    fix: "Check that the transactions API is running and try again.",
                }
                .into_response()
            }
            Error::InvalidTimezone(timezone) => ErrorPage {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::RemoteUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the transactions API".to_owned(),
                    details:
                        "Check that the transactions API is running, then submit the form again."
                            .to_owned(),
                },
            ),
            Error::RemoteStatus(status) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not save the transaction".to_owned(),
                    details: format!(
                        "The transactions API responded with status {status}. \
                        Your transaction was not saved, submit the form again to retry."
                    ),
                },
            ),
            Error::InvalidRemoteResponse(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Unexpected response from the transactions API".to_owned(),
                    details: "The transaction may not have been saved. \
                        Reload the page before submitting the form again."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezone(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[test]
    fn remote_errors_render_bad_gateway_page() {
        let errors = [
            Error::RemoteUnavailable("connection refused".to_owned()),
            Error::RemoteStatus(500),
            Error::InvalidRemoteResponse("expected value".to_owned()),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[tokio::test]
    async fn alert_response_mentions_status() {
        let response = Error::RemoteStatus(503).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("503"),
            "want alert to mention status 503, got {text:?}"
        );
    }
}
