use crate::errors::CoreError;

/// Bearer token issued by the fund server's sign-in endpoint.
///
/// Passed explicitly into every authenticated API call; nothing in this crate
/// keeps a token in global state. `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a bearer token. Empty or whitespace-only tokens are rejected.
    pub fn bearer(token: impl Into<String>) -> Result<Self, CoreError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(CoreError::MissingCredential);
        }
        Ok(Self { token })
    }

    /// Wrap a token that may not exist yet (e.g. nothing stored after logout).
    pub fn from_stored(token: Option<String>) -> Result<Self, CoreError> {
        token.map_or(Err(CoreError::MissingCredential), Self::bearer)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}
