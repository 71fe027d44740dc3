use log::info;

use crate::api::credentials::Credential;
use crate::api::traits::FundApi;
use crate::errors::CoreError;
use crate::models::user::UserRole;

/// Which surface a freshly signed-in account should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    UserDashboard,
    AdminConsole,
}

impl From<UserRole> for Destination {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::FundManager => Destination::AdminConsole,
            UserRole::User => Destination::UserDashboard,
        }
    }
}

/// Result of a successful sign-in: the credential to pass to later calls and
/// where to route the account.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub credential: Credential,
    pub role: UserRole,
    pub destination: Destination,
}

/// Sign in with email and password.
pub async fn sign_in(api: &dyn FundApi, email: &str, password: &str) -> Result<SignedIn, CoreError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(CoreError::ValidationError("Password is required".into()));
    }

    let response = api.sign_in(email, password).await?;
    let credential = Credential::bearer(response.token)?;
    info!("signed in as {:?}", response.role);

    Ok(SignedIn {
        credential,
        role: response.role,
        destination: response.role.into(),
    })
}

/// Register a new depositor. Returns the server's confirmation message.
pub async fn sign_up(
    api: &dyn FundApi,
    email: &str,
    password: &str,
    name: &str,
) -> Result<String, CoreError> {
    let email = validate_email(email)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::ValidationError("Name is required".into()));
    }
    if password.is_empty() {
        return Err(CoreError::ValidationError("Password is required".into()));
    }

    let ack = api.sign_up(email, password, name).await?;
    Ok(ack.message.unwrap_or_default())
}

fn validate_email(email: &str) -> Result<&str, CoreError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(CoreError::ValidationError(format!(
            "'{email}' is not a valid email address"
        ))),
    }
}
