use log::debug;

use crate::models::chart::{BalancePoint, ChartSeries, Timeframe};
use crate::models::transaction::{Transaction, TransactionType};

/// Number of samples surfaced by the daily and monthly views, and buckets in the weekly view.
const WINDOW: usize = 4;

/// Stride between weekly buckets, in balance samples.
const WEEK_STRIDE: usize = 7;

/// Turns an ordered transaction list into a chartable balance series and a
/// performance percentage.
///
/// Pure computation without I/O or retained state. Callers recompute on every
/// data refresh or timeframe change. Input must be oldest-first; the
/// aggregator never re-sorts (see [`crate::models::ledger::Ledger`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionAggregator;

impl TransactionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `transactions` (oldest-first) for the given timeframe.
    pub fn aggregate(&self, transactions: &[Transaction], timeframe: Timeframe) -> ChartSeries {
        let (history, principal) = Self::walk(transactions);
        let performance_percent = Self::performance(&history, principal);
        let (labels, values) = Self::bucket(&history, timeframe);

        debug!(
            "aggregated {} transactions into {} {} samples ({performance_percent:.2}%)",
            transactions.len(),
            values.len(),
            timeframe,
        );

        ChartSeries {
            labels,
            values,
            performance_percent,
        }
    }

    /// Aggregate with a timeframe given by name.
    ///
    /// Unknown names produce empty labels/values; the performance figure is
    /// still computed.
    pub fn aggregate_named(&self, transactions: &[Transaction], timeframe: &str) -> ChartSeries {
        match timeframe.parse::<Timeframe>() {
            Ok(tf) => self.aggregate(transactions, tf),
            Err(_) => {
                debug!("unknown timeframe '{timeframe}', returning empty series");
                let (history, principal) = Self::walk(transactions);
                ChartSeries {
                    labels: Vec::new(),
                    values: Vec::new(),
                    performance_percent: Self::performance(&history, principal),
                }
            }
        }
    }

    /// Running balance after each processed transaction, in input order.
    pub fn balance_history(&self, transactions: &[Transaction]) -> Vec<BalancePoint> {
        Self::walk(transactions).0
    }

    /// Total principal deposited through processed deposits.
    pub fn principal_deposited(&self, transactions: &[Transaction]) -> f64 {
        Self::walk(transactions).1
    }

    /// Return on principal in percent; `0` when there is no history or no principal.
    pub fn performance(history: &[BalancePoint], principal: f64) -> f64 {
        match history.last() {
            Some(last) if principal > 0.0 => (last.balance - principal) / principal * 100.0,
            _ => 0.0,
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn walk(transactions: &[Transaction]) -> (Vec<BalancePoint>, f64) {
        let mut running = 0.0;
        let mut principal = 0.0;
        let mut history = Vec::with_capacity(transactions.len());

        for tx in transactions.iter().filter(|tx| tx.is_processed()) {
            running += tx.signed_amount();
            if tx.transaction_type == TransactionType::Deposit {
                principal += tx.amount;
            }
            history.push(BalancePoint {
                date: tx.date.clone(),
                balance: running,
            });
        }

        (history, principal)
    }

    fn bucket(history: &[BalancePoint], timeframe: Timeframe) -> (Vec<String>, Vec<f64>) {
        if history.is_empty() {
            return (Vec::new(), Vec::new());
        }

        match timeframe {
            Timeframe::Daily => Self::tail(history, |date| char_suffix(date, 2)),
            Timeframe::Monthly => Self::tail(history, |date| char_slice(date, 5, 7)),
            Timeframe::All => history
                .iter()
                .map(|h| (char_slice(&h.date, 0, 4), h.balance))
                .unzip(),
            Timeframe::Weekly => {
                // Later buckets clamp to the last sample on short histories.
                let last = history.len() - 1;
                (0..WINDOW)
                    .map(|i| {
                        let idx = (i * WEEK_STRIDE).min(last);
                        (format!("Week {}", i + 1), history[idx].balance)
                    })
                    .unzip()
            }
        }
    }

    fn tail(history: &[BalancePoint], label: impl Fn(&str) -> String) -> (Vec<String>, Vec<f64>) {
        let start = history.len().saturating_sub(WINDOW);
        history[start..]
            .iter()
            .map(|h| (label(&h.date), h.balance))
            .unzip()
    }
}

/// Characters `[from, to)` of `s`, clamped to its length.
fn char_slice(s: &str, from: usize, to: usize) -> String {
    s.chars().skip(from).take(to.saturating_sub(from)).collect()
}

/// Last `n` characters of `s`.
fn char_suffix(s: &str, n: usize) -> String {
    let len = s.chars().count();
    s.chars().skip(len.saturating_sub(n)).collect()
}
