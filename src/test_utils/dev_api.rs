use time::OffsetDateTime;
use tokio::net::TcpListener;

use crate::{
    dev_api::{DevApiState, build_dev_api_router},
    transaction::{Transaction, TransactionType},
};

/// The handle to a development API spawned for a test.
pub(crate) type DevApi = DevApiState;

/// Serve the development API on a random local port.
///
/// Returns the base URL to pass to the HTTP client and the state of the API
/// for inspecting the stored records.
pub(crate) async fn spawn_dev_api(seed: Vec<Transaction>) -> (String, DevApi) {
    let state = DevApiState::new(seed);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener.local_addr().expect("Could not get local address");
    let router = build_dev_api_router(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Development API stopped");
    });

    (format!("http://{address}"), state)
}

/// A base URL where nothing is listening.
pub(crate) async fn unreachable_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let address = listener.local_addr().expect("Could not get local address");
    drop(listener);

    format!("http://{address}")
}

/// An outcome of $10 in the "Other" category.
pub(crate) fn test_transaction(
    id: i64,
    description: &str,
    created_at: OffsetDateTime,
) -> Transaction {
    Transaction {
        id,
        description: description.to_owned(),
        type_: TransactionType::Outcome,
        price: 10.0,
        category: "Other".to_owned(),
        created_at,
    }
}
