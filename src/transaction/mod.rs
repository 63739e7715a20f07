//! Transaction management for dt money.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `CreateTransactionRequest`
//! - The client for the remote transactions API
//! - The `TransactionStore` that holds the transactions shown to the user
//! - Form validation, rendering and the route handlers for the transactions page

mod core;
mod create_endpoint;
mod form;
mod remote;
mod store;
mod summary;
mod transactions_page;
mod view;

pub use core::{
    CreateTransactionRequest, NewTransactionBody, Transaction, TransactionId, TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use form::{FieldError, FormField, NewTransactionForm, Search, SearchForm};
pub use remote::{HttpTransactionsResource, TransactionsResource};
pub use store::{Selection, TransactionList, TransactionStore};
pub use summary::Summary;
pub use transactions_page::get_transactions_page;
