use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Principal paid into the fund
    Deposit,
    /// Funds paid out to the depositor
    Withdrawal,
    /// Gain credited by the fund manager
    Profit,
    /// Loss debited by the fund manager
    Loss,
}

impl TransactionType {
    /// `true` for movements that increase the running balance.
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionType::Deposit | TransactionType::Profit)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "Deposit"),
            TransactionType::Withdrawal => write!(f, "Withdrawal"),
            TransactionType::Profit => write!(f, "Profit"),
            TransactionType::Loss => write!(f, "Loss"),
        }
    }
}

/// Reconciliation state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting manual reconciliation, excluded from balance math
    Pending,
    /// Reconciled, counts towards balance and performance
    Processed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Processed => write!(f, "processed"),
        }
    }
}

/// A single ledger transaction, as delivered by the fund API.
///
/// Owned by the server and consumed read-only. `fee` and `currency` are
/// informational; balance math only looks at `transaction_type`, `amount`
/// and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque server identifier
    #[serde(deserialize_with = "super::opaque_id")]
    pub id: String,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Non-negative amount, currency-agnostic at this layer
    pub amount: f64,

    #[serde(default)]
    pub fee: f64,

    /// ISO-like code or "CRYPTO"
    #[serde(default)]
    pub currency: String,

    pub status: TransactionStatus,

    /// Calendar date string, `YYYY-MM-DD` (possibly with a time suffix)
    pub date: String,

    #[serde(default)]
    pub details: Option<String>,

    /// Owner id, opaque like `id`
    #[serde(
        default,
        deserialize_with = "super::opaque_id_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        transaction_type: TransactionType,
        amount: f64,
        status: TransactionStatus,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_type,
            amount,
            fee: 0.0,
            currency: "USD".to_string(),
            status,
            date: date.into(),
            details: None,
            user_id: None,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.status == TransactionStatus::Processed
    }

    /// Signed effect of this transaction on the running balance.
    pub fn signed_amount(&self) -> f64 {
        if self.transaction_type.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Calendar date parsed from the leading `YYYY-MM-DD` of `date`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let head: String = self.date.chars().take(10).collect();
        NaiveDate::parse_from_str(&head, "%Y-%m-%d").ok()
    }
}

/// Request body for recording a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub fee: f64,
    pub currency: String,
    pub details: String,
    pub status: TransactionStatus,
}

/// Request body used by the fund manager to reconcile a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: f64,
    pub fee: f64,
    pub status: TransactionStatus,
}

/// A pending transaction joined with the requesting depositor's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRequest {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}
