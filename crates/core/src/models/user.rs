use serde::{Deserialize, Serialize};

/// Role assigned to an account by the fund server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Regular depositor
    #[default]
    User,
    /// Administrator of the fund
    FundManager,
}

/// Approval state of a depositor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Pending => write!(f, "pending"),
            UserStatus::Approved => write!(f, "approved"),
            UserStatus::Denied => write!(f, "denied"),
        }
    }
}

/// An account as returned by `/api/user` and `/api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "super::opaque_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Portfolio balance in USD, maintained by the fund manager
    #[serde(default)]
    pub portfolio: f64,

    /// Server-relative path of the profile picture, if uploaded
    #[serde(default)]
    pub profile_pic: Option<String>,

    #[serde(default)]
    pub role: UserRole,

    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    pub fn is_fund_manager(&self) -> bool {
        self.role == UserRole::FundManager
    }

    pub fn has_profile_picture(&self) -> bool {
        self.profile_pic.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Absolute URL of the profile picture, resolved against the API base URL.
    pub fn profile_picture_url(&self, base_url: &str) -> Option<String> {
        self.profile_pic
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", base_url.trim_end_matches('/'), p))
    }
}

/// Response of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,

    #[serde(default)]
    pub role: UserRole,
}

/// Response of a profile picture upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureResponse {
    pub profile_pic: String,

    #[serde(default)]
    pub message: String,
}

/// Generic `{ "message": ... }` acknowledgement used by several endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}
