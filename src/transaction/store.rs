//! The transaction store: the in-memory list of transactions shared by every view.
//!
//! The store is the single source of truth for the transactions shown to the
//! user. It mediates all reads and writes to the [TransactionsResource] and
//! publishes every change of its list through a [watch] channel so consumers
//! can subscribe to the whole list or to a [Selection] of it.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::watch;

use crate::{
    Error,
    transaction::{
        core::{CreateTransactionRequest, NewTransactionBody, Transaction, sort_newest_first},
        remote::TransactionsResource,
    },
};

/// A snapshot of the store's transactions, newest first.
pub type TransactionList = Arc<[Transaction]>;

/// Holds the transactions for the current session and the operations that
/// change them.
///
/// Cloning a store is cheap and every clone shares the same list.
#[derive(Debug)]
pub struct TransactionStore<R> {
    inner: Arc<StoreInner<R>>,
}

#[derive(Debug)]
struct StoreInner<R> {
    resource: R,
    transactions: watch::Sender<TransactionList>,
    filter: watch::Sender<Option<String>>,
}

impl<R> Clone for TransactionStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: TransactionsResource> TransactionStore<R> {
    /// Create a store with an empty list that reads and writes through `resource`.
    pub fn new(resource: R) -> Self {
        let (transactions, _) = watch::channel(TransactionList::from(Vec::new()));
        let (filter, _) = watch::channel(None);

        Self {
            inner: Arc::new(StoreInner {
                resource,
                transactions,
                filter,
            }),
        }
    }

    /// Replace the list with the transactions matching `filter`, or all
    /// transactions if `filter` is `None` or blank.
    ///
    /// Each call is a full replace, so calling it repeatedly is safe.
    ///
    /// # Errors
    /// Returns the error from the transactions API. The list is left unchanged.
    pub async fn fetch_transactions(&self, filter: Option<&str>) -> Result<(), Error> {
        let filter = filter.map(str::trim).filter(|filter| !filter.is_empty());

        let mut transactions = self
            .inner
            .resource
            .list(filter)
            .await
            .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

        // The API is asked to sort, but the ordering of the list must not
        // depend on it honouring the request.
        sort_newest_first(&mut transactions);

        tracing::debug!(
            "fetched {} transactions with filter {filter:?}",
            transactions.len()
        );

        self.inner.filter.send_replace(filter.map(str::to_owned));
        self.inner.transactions.send_replace(transactions.into());

        Ok(())
    }

    /// Create a transaction and insert it at the head of the list without
    /// refetching.
    ///
    /// The transaction is stamped with the current time. Each call creates a
    /// new transaction, there is no deduplication.
    ///
    /// # Errors
    /// Returns the error from the transactions API. The list is left unchanged
    /// and the request is not retried.
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<Transaction, Error> {
        let body = NewTransactionBody::new(request, OffsetDateTime::now_utc());

        let transaction = self
            .inner
            .resource
            .create(&body)
            .await
            .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

        self.inner.transactions.send_modify(|transactions| {
            *transactions = std::iter::once(transaction.clone())
                .chain(transactions.iter().cloned())
                .collect();
        });

        tracing::info!("created transaction {}", transaction.id);

        Ok(transaction)
    }
}

impl<R> TransactionStore<R> {
    /// The current list of transactions, newest first.
    pub fn transactions(&self) -> TransactionList {
        self.inner.transactions.borrow().clone()
    }

    /// The filter used by the last successful fetch, if any.
    pub fn filter(&self) -> Option<String> {
        self.inner.filter.borrow().clone()
    }

    /// Subscribe to every change of the list.
    pub fn subscribe(&self) -> watch::Receiver<TransactionList> {
        self.inner.transactions.subscribe()
    }

    /// Subscribe to the part of the list picked out by `selector`.
    ///
    /// The returned [Selection] only reports a change when the selected value
    /// differs from the last one it reported.
    pub fn select<T, F>(&self, selector: F) -> Selection<T, F>
    where
        T: PartialEq,
        F: Fn(&[Transaction]) -> T,
    {
        let receiver = self.subscribe();
        let current = selector(&receiver.borrow());

        Selection {
            receiver,
            selector,
            current,
        }
    }
}

/// A subscription to a value derived from the store's list.
pub struct Selection<T, F> {
    receiver: watch::Receiver<TransactionList>,
    selector: F,
    current: T,
}

impl<T, F> Selection<T, F>
where
    T: PartialEq,
    F: Fn(&[Transaction]) -> T,
{
    /// The most recently selected value.
    pub fn get(&self) -> &T {
        &self.current
    }

    /// Wait until the selected value changes and return the new value.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<&T> {
        loop {
            self.receiver.changed().await.ok()?;

            let selected = (self.selector)(&self.receiver.borrow_and_update());

            if selected != self.current {
                self.current = selected;
                return Some(&self.current);
            }
        }
    }
}
