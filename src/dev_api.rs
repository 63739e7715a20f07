//! A stand-in for the transactions API for local development and tests.
//!
//! Serves `GET /transactions` and `POST /transactions` the way a json-server
//! instance backed by a `db.json` file does, holding the records in memory.

use std::{
    cmp::Ordering,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{self, AtomicUsize},
    },
};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{NewTransactionBody, Transaction},
};

/// The route for the transactions collection.
pub const DEV_TRANSACTIONS: &str = "/transactions";

/// The records held by the development API.
///
/// Cloning is cheap and every clone shares the same records.
#[derive(Debug, Clone, Default)]
pub struct DevApiState {
    transactions: Arc<Mutex<Vec<Transaction>>>,
    list_requests: Arc<AtomicUsize>,
}

impl DevApiState {
    /// Create the state with the records in `seed`.
    pub fn new(seed: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(seed)),
            list_requests: Arc::default(),
        }
    }

    /// A copy of the stored records in insertion order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions
            .lock()
            .map(|transactions| transactions.clone())
            .unwrap_or_default()
    }

    /// How many list requests have been served.
    pub fn list_requests(&self) -> usize {
        self.list_requests.load(atomic::Ordering::SeqCst)
    }
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Read the records from a json-server style `db.json` file, i.e. an object
/// with a `transactions` array.
///
/// # Errors
/// Returns [Error::InvalidSeedFile] if the file cannot be read or parsed.
pub fn load_seed(path: &Path) -> Result<Vec<Transaction>, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| Error::InvalidSeedFile(format!("{}: {error}", path.display())))?;

    let seed: SeedFile = serde_json::from_str(&text)
        .map_err(|error| Error::InvalidSeedFile(format!("{}: {error}", path.display())))?;

    Ok(seed.transactions)
}

/// Return a router serving the transactions collection.
pub fn build_dev_api_router(state: DevApiState) -> Router {
    Router::new()
        .route(
            DEV_TRANSACTIONS,
            get(list_transactions).post(create_transaction),
        )
        .with_state(state)
}

/// The query parameters understood by the list route.
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    /// Full-text search over every field.
    q: Option<String>,
    #[serde(rename = "_sort")]
    sort: Option<String>,
    #[serde(rename = "_order")]
    order: Option<String>,
}

async fn list_transactions(
    State(state): State<DevApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, StatusCode> {
    state.list_requests.fetch_add(1, atomic::Ordering::SeqCst);

    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the records lock: {error}"))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut matches: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            needle
                .as_deref()
                .is_none_or(|needle| matches_query(transaction, needle))
        })
        .cloned()
        .collect();

    if let Some(field) = query.sort.as_deref() {
        if query.order.as_deref() == Some("desc") {
            matches.sort_by(|a, b| compare_by_field(b, a, field));
        } else {
            matches.sort_by(|a, b| compare_by_field(a, b, field));
        }
    }

    Ok(Json(matches))
}

async fn create_transaction(
    State(state): State<DevApiState>,
    Json(body): Json<NewTransactionBody>,
) -> Result<(StatusCode, Json<Transaction>), StatusCode> {
    let mut transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the records lock: {error}"))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let id = transactions
        .iter()
        .map(|transaction| transaction.id)
        .max()
        .unwrap_or(0)
        + 1;
    let transaction = body.into_transaction(id);
    transactions.push(transaction.clone());

    tracing::info!("stored transaction {id}");

    Ok((StatusCode::CREATED, Json(transaction)))
}

fn matches_query(transaction: &Transaction, needle: &str) -> bool {
    [
        transaction.id.to_string(),
        transaction.description.to_lowercase(),
        transaction.type_.to_string(),
        transaction.price.to_string(),
        transaction.category.to_lowercase(),
        transaction.created_at.to_string().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(needle))
}

/// Unknown fields compare equal so the stable sort keeps insertion order.
fn compare_by_field(a: &Transaction, b: &Transaction, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "description" => a.description.cmp(&b.description),
        "type" => a.type_.as_str().cmp(b.type_.as_str()),
        "price" => a.price.total_cmp(&b.price),
        "category" => a.category.cmp(&b.category),
        "createdAt" => a.created_at.cmp(&b.created_at),
        _ => Ordering::Equal,
    }
}
