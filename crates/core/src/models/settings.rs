use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::currency::{DisplayCurrency, Language};

/// Default location of the fund API during development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client settings: where the fund API lives and how values are presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the fund API, without trailing slash (e.g., "https://api.example.com").
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Interface language.
    pub language: Language,

    /// Currency in which the portfolio balance is displayed.
    pub display_currency: DisplayCurrency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: Language::English,
            display_currency: DisplayCurrency::USD,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings pointing at a specific API host, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CoreError> {
        let settings = Self {
            api_base_url: base_url.into(),
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::InvalidConfig(format!(
                "api_base_url '{}' must start with http:// or https://",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}
