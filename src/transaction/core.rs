//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ============================================================================
// MODELS
// ============================================================================

/// The identifier the transactions API assigns to a transaction.
pub type TransactionId = i64;

/// Whether a transaction earned money or spent it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. a salary.
    #[default]
    Income,
    /// Money going out, e.g. rent.
    Outcome,
}

impl TransactionType {
    /// The name used for this type in forms and by the transactions API.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }

    /// Parse the exact name of a transaction type, `"income"` or `"outcome"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionType::Income),
            "outcome" => Some(TransactionType::Outcome),
            _ => None,
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or outcome, i.e. an event where money was either earned or spent.
///
/// Transactions are created by the transactions API from a
/// [CreateTransactionRequest], which assigns the `id`.
///
/// Records from the API are checked when decoded: a blank description or
/// category, or a negative or non-finite price, is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTransaction")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The amount of money earned or spent, never negative.
    pub price: f64,
    /// The category of the transaction, e.g. "Groceries", "Housing".
    pub category: String,
    /// When the transaction was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction as decoded from JSON, before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    id: TransactionId,
    description: String,
    #[serde(rename = "type")]
    type_: TransactionType,
    price: f64,
    category: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = String;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        if raw.description.trim().is_empty() {
            return Err(format!("transaction {} has a blank description", raw.id));
        }

        if raw.category.trim().is_empty() {
            return Err(format!("transaction {} has a blank category", raw.id));
        }

        if !raw.price.is_finite() || raw.price < 0.0 {
            return Err(format!(
                "transaction {} has an invalid price {}",
                raw.id, raw.price
            ));
        }

        Ok(Transaction {
            id: raw.id,
            description: raw.description,
            type_: raw.type_,
            // Normalises -0.0 to 0.0.
            price: raw.price + 0.0,
            category: raw.category,
            created_at: raw.created_at,
        })
    }
}

/// A validated request to create a transaction.
///
/// The only way to get one outside of tests is through
/// [NewTransactionForm::validate](crate::transaction::NewTransactionForm::validate),
/// so every request that reaches the store has a non-empty description and
/// category and a non-negative price.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTransactionRequest {
    description: String,
    price: f64,
    category: String,
    type_: TransactionType,
}

impl CreateTransactionRequest {
    /// Create a request without validation.
    ///
    /// The caller should ensure that `description` and `category` are not
    /// empty and that `price` is not negative.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the invariants are violated it will cause incorrect behaviour but
    /// not affect memory safety.
    pub fn new_unchecked(
        description: &str,
        price: f64,
        category: &str,
        type_: TransactionType,
    ) -> Self {
        Self {
            description: description.to_owned(),
            price,
            category: category.to_owned(),
            type_,
        }
    }

    /// What the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount of money, never negative.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The category, e.g. "Housing".
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether money was earned or spent.
    pub fn type_(&self) -> TransactionType {
        self.type_
    }
}

/// The JSON body sent to the transactions API to create a transaction.
///
/// This is a [CreateTransactionRequest] stamped with the time of creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionBody {
    /// What the transaction was for.
    pub description: String,
    /// The amount of money, never negative.
    pub price: f64,
    /// The category, e.g. "Housing".
    pub category: String,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// When the transaction was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NewTransactionBody {
    /// Stamp `request` with its creation time.
    pub fn new(request: CreateTransactionRequest, created_at: OffsetDateTime) -> Self {
        Self {
            description: request.description,
            price: request.price,
            category: request.category,
            type_: request.type_,
            created_at,
        }
    }

    /// The transaction the API should create for this body once it assigns `id`.
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            type_: self.type_,
            price: self.price,
            category: self.category,
            created_at: self.created_at,
        }
    }
}

/// Sort `transactions` by creation time, newest first.
///
/// The sort is stable so transactions created at the same instant keep the
/// order the API returned them in.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ============================================================================
// TESTS
// ============================================================================
