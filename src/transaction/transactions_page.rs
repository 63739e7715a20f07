//! Defines the route handler for the page that displays transactions as a table.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    timezone::get_local_offset,
    transaction::{
        form::{Search, SearchForm},
        remote::HttpTransactionsResource,
        store::TransactionStore,
        view::{SearchFormState, transactions_view},
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The store holding the transactions shown on the page.
    pub store: TransactionStore<HttpTransactionsResource>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the transactions page.
///
/// Loading the page fetches the transactions from the transactions API,
/// filtered by the query `q` if one was given. A blank query is rejected
/// without refetching and the page shows the current list with an error
/// under the search field.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(search_form): Query<SearchForm>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezone(state.local_timezone.clone()))?;

    let query = search_form.q.as_deref().unwrap_or_default();

    let search = match search_form.validate() {
        Ok(Search::All) => {
            state.store.fetch_transactions(None).await?;
            SearchFormState { query, error: None }
        }
        Ok(Search::Query(filter)) => {
            state.store.fetch_transactions(Some(filter.as_str())).await?;
            SearchFormState {
                query: query.trim(),
                error: None,
            }
        }
        Err(error) => {
            tracing::debug!("rejected search: {error}");
            SearchFormState {
                query,
                error: Some(error),
            }
        }
    };

    let transactions = state.store.transactions();

    Ok(transactions_view(&transactions, search, local_offset).into_response())
}
