use std::collections::HashMap;

use log::{debug, info};

use crate::api::credentials::Credential;
use crate::api::traits::{FundApi, UserAction};
use crate::errors::CoreError;
use crate::models::chart::{ChartSeries, Timeframe};
use crate::models::ledger::Ledger;
use crate::models::transaction::{PendingRequest, TransactionType};
use crate::models::user::{User, UserStatus};
use crate::services::aggregator::TransactionAggregator;
use crate::services::ledger_service::LedgerService;
use crate::services::user_service::UserService;

/// Fund-manager console state.
///
/// Keeps the depositor list, the pending request queue and the ledgers the
/// manager has opened. Each mutation is followed by an explicit re-fetch of
/// whatever it affected.
#[must_use]
pub struct AdminConsole {
    api: Box<dyn FundApi>,
    credential: Credential,
    manager: User,
    users: Vec<User>,
    pending: Vec<PendingRequest>,
    ledgers: HashMap<String, Ledger>,
    aggregator: TransactionAggregator,
    ledger_service: LedgerService,
    user_service: UserService,
}

impl std::fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("manager", &self.manager.id)
            .field("users", &self.users.len())
            .field("pending", &self.pending.len())
            .field("open_ledgers", &self.ledgers.len())
            .finish()
    }
}

impl AdminConsole {
    /// Verify the credential belongs to a fund manager, then load users and the
    /// pending queue.
    pub async fn load(api: Box<dyn FundApi>, credential: Credential) -> Result<Self, CoreError> {
        let manager = api.current_user(&credential).await?;
        if !manager.is_fund_manager() {
            return Err(CoreError::Unauthorized(format!(
                "user {} is not a fund manager",
                manager.id
            )));
        }
        info!("admin console opened by {}", manager.id);

        let mut console = Self {
            api,
            credential,
            manager,
            users: Vec::new(),
            pending: Vec::new(),
            ledgers: HashMap::new(),
            aggregator: TransactionAggregator::new(),
            ledger_service: LedgerService::new(),
            user_service: UserService::new(),
        };
        console.refresh_users().await?;
        console.refresh_pending().await?;
        Ok(console)
    }

    pub async fn refresh_users(&mut self) -> Result<(), CoreError> {
        let users = self.api.list_users(&self.credential).await?;
        self.users = self.user_service.depositors(users);
        debug!("loaded {} depositor accounts", self.users.len());
        Ok(())
    }

    pub async fn refresh_pending(&mut self) -> Result<(), CoreError> {
        self.pending = self.api.pending_requests(&self.credential).await?;
        debug!("loaded {} pending requests", self.pending.len());
        Ok(())
    }

    // ── Accounts ────────────────────────────────────────────────────

    #[must_use]
    pub fn manager(&self) -> &User {
        &self.manager
    }

    /// All depositor accounts (fund managers excluded).
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Accounts awaiting approval.
    #[must_use]
    pub fn pending_users(&self) -> Vec<&User> {
        self.user_service.with_status(&self.users, UserStatus::Pending)
    }

    #[must_use]
    pub fn approved_users(&self) -> Vec<&User> {
        self.user_service.with_status(&self.users, UserStatus::Approved)
    }

    pub async fn approve_user(&mut self, user_id: &str) -> Result<(), CoreError> {
        self.moderate(user_id, UserAction::Approve).await
    }

    pub async fn deny_user(&mut self, user_id: &str) -> Result<(), CoreError> {
        self.moderate(user_id, UserAction::Deny).await
    }

    /// Delete an account. Its cached ledger is dropped as well.
    pub async fn delete_user(&mut self, user_id: &str) -> Result<(), CoreError> {
        self.moderate(user_id, UserAction::Delete).await?;
        self.ledgers.remove(user_id);
        Ok(())
    }

    /// Overwrite a depositor's portfolio balance from manager input.
    pub async fn set_portfolio(&mut self, user_id: &str, input: &str) -> Result<(), CoreError> {
        self.require_user(user_id)?;
        let portfolio = self.user_service.parse_portfolio(input)?;
        self.api
            .set_portfolio(&self.credential, user_id, portfolio)
            .await?;
        info!("portfolio of {user_id} set to {portfolio}");
        self.refresh_users().await
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Pending deposit/withdrawal requests across all depositors.
    #[must_use]
    pub fn pending_requests(&self) -> &[PendingRequest] {
        &self.pending
    }

    /// Fetch (or re-fetch) the ledger of one depositor.
    pub async fn open_ledger(&mut self, user_id: &str) -> Result<&Ledger, CoreError> {
        let listing = self
            .api
            .list_transactions(&self.credential, user_id)
            .await?;
        let ledger = Ledger::from_newest_first(listing);
        self.ledgers.insert(user_id.to_string(), ledger);
        self.ledgers
            .get(user_id)
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))
    }

    /// Forget a depositor's ledger (the "hide transactions" toggle).
    pub fn close_ledger(&mut self, user_id: &str) -> bool {
        self.ledgers.remove(user_id).is_some()
    }

    /// A previously opened ledger.
    #[must_use]
    pub fn ledger(&self, user_id: &str) -> Option<&Ledger> {
        self.ledgers.get(user_id)
    }

    /// Balance chart of an opened ledger, as the depositor would see it.
    #[must_use]
    pub fn chart_for(&self, user_id: &str, timeframe: Timeframe) -> Option<ChartSeries> {
        self.ledgers
            .get(user_id)
            .map(|l| self.aggregator.aggregate(l.as_slice(), timeframe))
    }

    /// Reconcile a transaction with its final amount and fee.
    pub async fn process_transaction(
        &mut self,
        transaction_id: &str,
        user_id: &str,
        amount: f64,
        fee: f64,
    ) -> Result<(), CoreError> {
        self.require_transaction(user_id, transaction_id)?;
        let update = self.ledger_service.processing_update(amount, fee)?;
        self.api
            .update_transaction(&self.credential, transaction_id, &update)
            .await?;
        info!("transaction {transaction_id} processed ({amount}, fee {fee})");
        self.after_transaction_change(user_id).await
    }

    pub async fn delete_transaction(
        &mut self,
        transaction_id: &str,
        user_id: &str,
    ) -> Result<(), CoreError> {
        self.require_transaction(user_id, transaction_id)?;
        self.api
            .delete_transaction(&self.credential, transaction_id)
            .await?;
        info!("transaction {transaction_id} deleted");
        self.after_transaction_change(user_id).await
    }

    /// Add a zero-amount processed entry to a depositor's ledger.
    pub async fn add_manager_entry(
        &mut self,
        user_id: &str,
        transaction_type: TransactionType,
    ) -> Result<(), CoreError> {
        self.require_user(user_id)?;
        let entry = self.ledger_service.manager_entry(user_id, transaction_type)?;
        self.api
            .create_transaction(&self.credential, &entry)
            .await?;
        info!("{transaction_type} entry added for {user_id}");
        self.open_ledger(user_id).await?;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn moderate(&mut self, user_id: &str, action: UserAction) -> Result<(), CoreError> {
        self.require_user(user_id)?;
        self.api
            .moderate_user(&self.credential, user_id, action)
            .await?;
        info!("user {user_id}: {}", action.path_segment());
        self.refresh_users().await
    }

    async fn after_transaction_change(&mut self, user_id: &str) -> Result<(), CoreError> {
        self.open_ledger(user_id).await?;
        self.refresh_pending().await
    }

    /// Checks against the cached ledger only; unopened ledgers defer to the server.
    fn require_transaction(&self, user_id: &str, transaction_id: &str) -> Result<(), CoreError> {
        match self.ledgers.get(user_id) {
            Some(ledger) if ledger.get(transaction_id).is_none() => {
                Err(CoreError::TransactionNotFound(transaction_id.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn require_user(&self, user_id: &str) -> Result<&User, CoreError> {
        self.user_service
            .find(&self.users, user_id)
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))
    }
}
