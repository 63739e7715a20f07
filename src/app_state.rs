//! Implements a struct that holds the state of the REST server.

use crate::{
    Error,
    timezone::get_local_offset,
    transaction::{HttpTransactionsResource, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store holding the transactions shown to the user.
    pub store: TransactionStore<HttpTransactionsResource>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with an empty store backed by the transactions
    /// API hosted at `api_url`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the timezone is not a canonical timezone name or
    /// the HTTP client cannot be initialised.
    pub fn new(api_url: &str, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        let resource = HttpTransactionsResource::new(api_url)?;

        Ok(Self {
            store: TransactionStore::new(resource),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{AppState, Error};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new("http://localhost:3333", "Mars/Olympus_Mons");

        assert!(matches!(result, Err(Error::InvalidTimezone(_))));
    }

    #[test]
    fn starts_with_empty_store() {
        let state = AppState::new("http://localhost:3333", "Pacific/Auckland").unwrap();

        assert!(state.store.transactions().is_empty());
        assert_eq!(state.store.filter(), None);
    }
}
