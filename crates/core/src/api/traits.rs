use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, PendingRequest, Transaction, TransactionUpdate};
use crate::models::user::{ApiMessage, ProfilePictureResponse, SignInResponse, User};

use super::credentials::Credential;

/// Moderation actions the fund manager can take on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    Approve,
    Deny,
    Delete,
}

impl UserAction {
    /// Path segment of the action endpoint (`/api/users/{id}/{segment}`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            UserAction::Approve => "approve",
            UserAction::Deny => "deny",
            UserAction::Delete => "delete",
        }
    }
}

/// Trait abstraction over the remote fund API.
///
/// The HTTP client implements it for production; tests and alternative
/// transports provide their own. Every authenticated call receives the
/// caller's [`Credential`] explicitly.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FundApi: Send + Sync {
    // ── Authentication ──────────────────────────────────────────────

    /// Exchange email/password for a bearer token and the account role.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse, CoreError>;

    /// Register a new depositor account (pending approval).
    async fn sign_up(&self, email: &str, password: &str, name: &str)
        -> Result<ApiMessage, CoreError>;

    // ── Depositor ───────────────────────────────────────────────────

    /// The account the credential belongs to.
    async fn current_user(&self, credential: &Credential) -> Result<User, CoreError>;

    /// All transactions of `user_id`, newest first.
    async fn list_transactions(
        &self,
        credential: &Credential,
        user_id: &str,
    ) -> Result<Vec<Transaction>, CoreError>;

    async fn create_transaction(
        &self,
        credential: &Credential,
        transaction: &NewTransaction,
    ) -> Result<(), CoreError>;

    /// Upload a profile picture. The bytes are passed through untouched.
    async fn upload_profile_picture(
        &self,
        credential: &Credential,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProfilePictureResponse, CoreError>;

    // ── Fund manager ────────────────────────────────────────────────

    async fn update_transaction(
        &self,
        credential: &Credential,
        transaction_id: &str,
        update: &TransactionUpdate,
    ) -> Result<(), CoreError>;

    async fn delete_transaction(
        &self,
        credential: &Credential,
        transaction_id: &str,
    ) -> Result<(), CoreError>;

    async fn list_users(&self, credential: &Credential) -> Result<Vec<User>, CoreError>;

    async fn pending_requests(
        &self,
        credential: &Credential,
    ) -> Result<Vec<PendingRequest>, CoreError>;

    async fn moderate_user(
        &self,
        credential: &Credential,
        user_id: &str,
        action: UserAction,
    ) -> Result<(), CoreError>;

    /// Overwrite the USD portfolio balance of a depositor.
    async fn set_portfolio(
        &self,
        credential: &Credential,
        user_id: &str,
        portfolio: f64,
    ) -> Result<(), CoreError>;
}
