//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;

use crate::{
    AppState,
    alert::Alert,
    html::format_currency,
    routing::get_internal_server_error_redirect,
    timezone::get_local_offset,
    transaction::{
        form::NewTransactionForm,
        remote::HttpTransactionsResource,
        store::TransactionStore,
        summary::Summary,
        view::{new_transaction_form_view, summary_view, transactions_table_view},
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store that saves the transaction and holds the list it is added to.
    pub store: TransactionStore<HttpTransactionsResource>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Invalid input is answered with the form, its values retained and the
/// first failing field marked, and nothing is sent to the transactions API.
/// On success the response is an empty form plus out-of-band swaps for the
/// summary, the transactions table and a success alert. If the transactions
/// API fails, an error alert is returned and the form is left as is so the
/// user can submit it again.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<NewTransactionForm>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(error) => {
            tracing::debug!("rejected new transaction: {error}");
            return new_transaction_form_view(&form, Some(&error)).into_response();
        }
    };

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("invalid timezone {}", state.local_timezone);
        return get_internal_server_error_redirect();
    };

    let transaction = match state.store.create_transaction(request).await {
        Ok(transaction) => transaction,
        Err(error) => return error.into_alert_response(),
    };

    let transactions = state.store.transactions();
    let summary = Summary::from_transactions(&transactions);
    let alert = Alert::Success {
        message: "Transaction registered".to_owned(),
        details: format!(
            "{} for {}.",
            transaction.description,
            format_currency(transaction.price)
        ),
    };

    html! {
        (new_transaction_form_view(&NewTransactionForm::default(), None))
        (summary_view(&summary, true))
        (transactions_table_view(&transactions, local_offset, true))
        (alert.into_oob_html())
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        test_utils::{
            DevApi, assert_form_error_message, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_fragment,
            spawn_dev_api, test_transaction, unreachable_api_url,
        },
        endpoints,
        transaction::{
            TransactionType,
            create_endpoint::{CreateTransactionState, create_transaction_endpoint},
            form::{NewTransactionForm, PRICE_NEGATIVE},
            remote::HttpTransactionsResource,
            store::TransactionStore,
        },
    };

    fn state_for(url: &str) -> CreateTransactionState {
        CreateTransactionState {
            store: TransactionStore::new(HttpTransactionsResource::new(url).unwrap()),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn seeded_state() -> (CreateTransactionState, DevApi) {
        let (url, dev_api) = spawn_dev_api(vec![test_transaction(
            1,
            "Salary",
            datetime!(2025-01-01 08:00 UTC),
        )])
        .await;
        let state = state_for(&url);
        state.store.fetch_transactions(None).await.unwrap();

        (state, dev_api)
    }

    fn rent_form() -> NewTransactionForm {
        NewTransactionForm {
            description: "Rent".to_owned(),
            price: "1200".to_owned(),
            category: "Housing".to_owned(),
            type_: Some("outcome".to_owned()),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, dev_api) = seeded_state().await;

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form())).await;

        assert_status_ok(&response);

        let transactions = state.store.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].description, "Rent");
        assert_eq!(transactions[0].type_, TransactionType::Outcome);
        assert_eq!(transactions[0].price, 1200.0);
        assert_eq!(transactions[1].description, "Salary");
        assert_eq!(dev_api.transactions().len(), 2);
        assert_eq!(dev_api.list_requests(), 1, "create must not refetch");

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input_with_value(&form, "description", "text", "");

        for id in ["summary", "transactions-table", "alert-container"] {
            let selector = Selector::parse(&format!("#{id}[hx-swap-oob=true]")).unwrap();
            assert!(
                html.select(&selector).next().is_some(),
                "want out-of-band swap for #{id}"
            );
        }
    }

    #[tokio::test]
    async fn invalid_form_is_returned_with_error() {
        let (state, dev_api) = seeded_state().await;
        let form = NewTransactionForm {
            price: "-5".to_owned(),
            ..rent_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form)).await;

        assert_status_ok(&response);
        assert_eq!(dev_api.transactions().len(), 1);
        assert_eq!(state.store.transactions().len(), 1);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "description", "text", "Rent");
        assert_form_input_with_value(&form, "price", "number", "-5");
        assert_form_error_message(&form, PRICE_NEGATIVE);
    }

    #[tokio::test]
    async fn unreachable_api_returns_error_alert() {
        let state = state_for(&unreachable_api_url().await);

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form())).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(state.store.transactions().is_empty());

        let html = parse_html_fragment(response).await;
        let alert = Selector::parse("[role=alert]").unwrap();
        assert!(html.select(&alert).next().is_some(), "want error alert");
    }

    #[tokio::test]
    async fn invalid_timezone_redirects_to_error_page() {
        let (mut state, dev_api) = seeded_state().await;
        state.local_timezone = "Not/A_Timezone".to_owned();

        let response = create_transaction_endpoint(State(state), Form(rent_form())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("hx-redirect").unwrap(),
            endpoints::INTERNAL_ERROR_VIEW
        );
        assert_eq!(dev_api.transactions().len(), 1);
    }
}
