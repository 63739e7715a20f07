//! Totals of the transactions currently in the store.

use crate::transaction::core::{Transaction, TransactionType};

/// The money earned, the money spent and the balance of a list of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// The sum of the income prices.
    pub income: f64,
    /// The sum of the outcome prices.
    pub outcome: f64,
    /// Income minus outcome.
    pub total: f64,
}

impl Summary {
    /// Total up `transactions` by type.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, outcome) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, outcome), transaction| {
                    match transaction.type_ {
                        TransactionType::Income => (income + transaction.price, outcome),
                        TransactionType::Outcome => (income, outcome + transaction.price),
                    }
                });

        Self {
            income,
            outcome,
            total: income - outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::{Transaction, TransactionType};

    use super::Summary;

    fn transaction(type_: TransactionType, price: f64) -> Transaction {
        Transaction {
            id: 1,
            description: "Test".to_owned(),
            type_,
            price,
            category: "Test".to_owned(),
            created_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn empty_list_sums_to_zero() {
        assert_eq!(Summary::from_transactions(&[]), Summary::default());
    }

    #[test]
    fn sums_by_type() {
        let transactions = [
            transaction(TransactionType::Income, 5000.0),
            transaction(TransactionType::Outcome, 1200.0),
            transaction(TransactionType::Outcome, 300.5),
            transaction(TransactionType::Income, 100.0),
        ];

        let summary = Summary::from_transactions(&transactions);

        assert_eq!(
            summary,
            Summary {
                income: 5100.0,
                outcome: 1500.5,
                total: 3599.5,
            }
        );
    }

    #[test]
    fn total_can_be_negative() {
        let transactions = [
            transaction(TransactionType::Income, 100.0),
            transaction(TransactionType::Outcome, 250.0),
        ];

        assert_eq!(Summary::from_transactions(&transactions).total, -150.0);
    }
}
