use crate::errors::CoreError;
use crate::models::user::{User, UserStatus};

/// Groups accounts for the admin console.
///
/// Fund managers never appear in the depositor lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// Depositor accounts, fund managers removed.
    pub fn depositors(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| !u.is_fund_manager()).collect()
    }

    /// Depositors with the given approval status, in listing order.
    pub fn with_status<'a>(&self, users: &'a [User], status: UserStatus) -> Vec<&'a User> {
        users
            .iter()
            .filter(|u| !u.is_fund_manager() && u.status == status)
            .collect()
    }

    pub fn find<'a>(&self, users: &'a [User], user_id: &str) -> Option<&'a User> {
        users.iter().find(|u| u.id == user_id)
    }

    /// Parse a portfolio value typed by the fund manager. Empty input means zero.
    pub fn parse_portfolio(&self, input: &str) -> Result<f64, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        let value: f64 = trimmed.parse().map_err(|_| {
            CoreError::ValidationError(format!(
                "'{trimmed}' is not a valid portfolio value"
            ))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Portfolio value must be a non-negative number, got {trimmed}"
            )));
        }
        Ok(value)
    }
}
