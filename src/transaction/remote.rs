//! The client for the transactions API, the remote resource that stores transactions.

use std::{future::Future, time::Duration};

use reqwest::{Client, Response};

use crate::{
    Error,
    transaction::core::{NewTransactionBody, Transaction},
};

/// How long to wait for the transactions API before giving up on a request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote resource that can list and create transactions.
///
/// Implementations must not retry failed requests; the user decides whether
/// to try again.
pub trait TransactionsResource: Send + Sync + 'static {
    /// Get the transactions matching the free-text `filter`, or all
    /// transactions if `filter` is `None`, newest first.
    fn list(
        &self,
        filter: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// Create a transaction and return it as stored by the resource.
    fn create(
        &self,
        body: &NewTransactionBody,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;
}

/// A [TransactionsResource] that talks to a json-server style REST API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransactionsResource {
    client: Client,
    transactions_url: String,
}

impl HttpTransactionsResource {
    /// Create a client for the API hosted at `base_url`, e.g. "http://localhost:3333".
    ///
    /// # Errors
    /// Returns [Error::RemoteUnavailable] if the HTTP client cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::RemoteUnavailable(error.to_string()))?;

        Ok(Self {
            client,
            transactions_url: format!("{}/transactions", base_url.trim_end_matches('/')),
        })
    }
}

impl TransactionsResource for HttpTransactionsResource {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Transaction>, Error> {
        let mut query = vec![("_sort", "createdAt"), ("_order", "desc")];
        if let Some(filter) = filter {
            query.push(("q", filter));
        }

        let response = self
            .client
            .get(&self.transactions_url)
            .query(&query)
            .send()
            .await
            .map_err(map_request_error)?;

        check_status(response)?
            .json()
            .await
            .map_err(|error| Error::InvalidRemoteResponse(error.to_string()))
    }

    async fn create(&self, body: &NewTransactionBody) -> Result<Transaction, Error> {
        let response = self
            .client
            .post(&self.transactions_url)
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        check_status(response)?
            .json()
            .await
            .map_err(|error| Error::InvalidRemoteResponse(error.to_string()))
    }
}

fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_decode() {
        Error::InvalidRemoteResponse(error.to_string())
    } else {
        Error::RemoteUnavailable(error.to_string())
    }
}

fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(
            "transactions API responded to {} with {status}",
            response.url()
        );
        Err(Error::RemoteStatus(status.as_u16()))
    }
}
