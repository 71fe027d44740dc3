use crate::errors::CoreError;
use crate::models::currency::{CryptoNetwork, FundingCurrency};
use crate::models::transaction::{
    NewTransaction, TransactionStatus, TransactionType, TransactionUpdate,
};

/// Prefix of the details line attached to deposit requests.
const DEPOSIT_DETAILS_PREFIX: &str = "Send funds to";

/// Details line attached to entries created from the admin console.
pub const MANAGER_ENTRY_DETAILS: &str = "Added by Fund Manager";

/// Builds and validates the transaction requests a dashboard can submit.
///
/// Pure business logic with no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Build a pending deposit request from form input.
    ///
    /// Crypto deposits must name the network they are sent on.
    pub fn deposit_request(
        &self,
        user_id: &str,
        amount_input: &str,
        currency: Option<FundingCurrency>,
        network: Option<CryptoNetwork>,
    ) -> Result<NewTransaction, CoreError> {
        let amount = Self::parse_amount(amount_input)?;
        let currency = Self::require_currency(currency)?;

        let details = if currency.is_crypto() {
            let network = Self::require_network(network)?;
            format!("{DEPOSIT_DETAILS_PREFIX} {currency} (Network: {network})")
        } else {
            format!("{DEPOSIT_DETAILS_PREFIX} {currency}")
        };

        Ok(NewTransaction {
            user_id: Self::require_user(user_id)?,
            transaction_type: TransactionType::Deposit,
            amount,
            fee: 0.0,
            currency: currency.code().to_string(),
            details,
            status: TransactionStatus::Pending,
        })
    }

    /// Build a pending withdrawal request from form input.
    ///
    /// `payout_details` is the bank account or wallet address; for crypto the
    /// network is appended.
    pub fn withdrawal_request(
        &self,
        user_id: &str,
        amount_input: &str,
        currency: Option<FundingCurrency>,
        network: Option<CryptoNetwork>,
        payout_details: &str,
    ) -> Result<NewTransaction, CoreError> {
        let amount = Self::parse_amount(amount_input)?;
        let currency = Self::require_currency(currency)?;

        let payout = payout_details.trim();
        if payout.is_empty() {
            return Err(CoreError::ValidationError(
                "Withdrawal requires bank details or a wallet address".into(),
            ));
        }

        let details = if currency.is_crypto() {
            let network = Self::require_network(network)?;
            format!("{payout} (Network: {network})")
        } else {
            payout.to_string()
        };

        Ok(NewTransaction {
            user_id: Self::require_user(user_id)?,
            transaction_type: TransactionType::Withdrawal,
            amount,
            fee: 0.0,
            currency: currency.code().to_string(),
            details,
            status: TransactionStatus::Pending,
        })
    }

    /// Zero-amount, already processed entry created by the fund manager.
    /// Amount and fee are filled in later through [`Self::processing_update`].
    pub fn manager_entry(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<NewTransaction, CoreError> {
        Ok(NewTransaction {
            user_id: Self::require_user(user_id)?,
            transaction_type,
            amount: 0.0,
            fee: 0.0,
            currency: "USD".to_string(),
            details: MANAGER_ENTRY_DETAILS.to_string(),
            status: TransactionStatus::Processed,
        })
    }

    /// Reconcile a transaction with its final amount and fee.
    pub fn processing_update(&self, amount: f64, fee: f64) -> Result<TransactionUpdate, CoreError> {
        for (field, value) in [("amount", amount), ("fee", fee)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(TransactionUpdate {
            amount,
            fee,
            status: TransactionStatus::Processed,
        })
    }

    /// Parse a user-typed amount. Must be a finite number greater than zero.
    pub fn parse_amount(input: &str) -> Result<f64, CoreError> {
        let trimmed = input.trim();
        let amount: f64 = trimmed.parse().map_err(|_| {
            CoreError::ValidationError(format!("'{trimmed}' is not a valid amount"))
        })?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be greater than zero, got {trimmed}"
            )));
        }
        Ok(amount)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn require_currency(currency: Option<FundingCurrency>) -> Result<FundingCurrency, CoreError> {
        currency.ok_or_else(|| CoreError::ValidationError("Select a currency".into()))
    }

    fn require_network(network: Option<CryptoNetwork>) -> Result<CryptoNetwork, CoreError> {
        network.ok_or_else(|| {
            CoreError::ValidationError("Crypto transfers require a network".into())
        })
    }

    fn require_user(user_id: &str) -> Result<String, CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::UserNotFound("empty user id".into()));
        }
        Ok(user_id.to_string())
    }
}
