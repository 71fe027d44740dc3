use log::warn;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionStatus, TransactionType};

/// One account's transactions, stored oldest-first.
///
/// The fund API lists transactions newest-first while balance aggregation
/// needs chronological order. Construction states which order the input is
/// in, so the reversal happens exactly once and never by accident.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an API listing (newest first).
    pub fn from_newest_first(mut transactions: Vec<Transaction>) -> Self {
        transactions.reverse();
        let ledger = Self { transactions };
        ledger.warn_if_unordered();
        ledger
    }

    /// Build from a list that is already chronological.
    pub fn from_oldest_first(transactions: Vec<Transaction>) -> Self {
        let ledger = Self { transactions };
        ledger.warn_if_unordered();
        ledger
    }

    /// Transactions oldest-first, ready for aggregation.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Unfiltered history view, newest first (pending entries included).
    pub fn newest_first(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().rev()
    }

    pub fn processed(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(|t| t.is_processed())
    }

    pub fn pending(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Pending)
    }

    /// Sum of processed deposits.
    pub fn principal_deposited(&self) -> f64 {
        self.processed()
            .filter(|t| t.transaction_type == TransactionType::Deposit)
            .map(|t| t.amount)
            .sum()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// `true` when every parseable date is on or after the previous one.
    pub fn is_chronological(&self) -> bool {
        let dates: Vec<_> = self
            .transactions
            .iter()
            .filter_map(Transaction::parsed_date)
            .collect();
        dates.windows(2).all(|w| w[0] <= w[1])
    }

    fn warn_if_unordered(&self) {
        if !self.is_chronological() {
            warn!(
                "ledger of {} transactions is not in chronological order; balances follow input order",
                self.transactions.len()
            );
        }
    }
}
