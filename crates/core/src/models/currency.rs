use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Currency in which the portfolio balance is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayCurrency {
    #[default]
    USD,
    TND,
}

impl DisplayCurrency {
    /// Arabic switches the dashboard to Tunisian dinars, everything else shows dollars.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Arabic => DisplayCurrency::TND,
            Language::English | Language::French => DisplayCurrency::USD,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DisplayCurrency::USD => "USD",
            DisplayCurrency::TND => "TND",
        }
    }
}

impl std::fmt::Display for DisplayCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for DisplayCurrency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(DisplayCurrency::USD),
            "TND" => Ok(DisplayCurrency::TND),
            other => Err(CoreError::ValidationError(format!(
                "Unsupported display currency '{other}'"
            ))),
        }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
            Language::French => "fr",
        }
    }

    /// Arabic is laid out right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Arabic)
    }
}

impl std::str::FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "ar" => Ok(Language::Arabic),
            "fr" => Ok(Language::French),
            other => Err(CoreError::ValidationError(format!(
                "Unsupported language '{other}': expected en, ar or fr"
            ))),
        }
    }
}

/// Currency a depositor can fund or withdraw in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FundingCurrency {
    /// Stablecoins (USDT, USDC, ...) on one of the supported networks
    Crypto,
    Tnd,
    Eur,
    Usd,
    Aed,
    Aud,
    Cad,
    Gbp,
    Huf,
    Nzd,
    Sgd,
    Try,
}

impl FundingCurrency {
    /// Currencies offered before the "more currencies" toggle.
    pub const PRIMARY: [FundingCurrency; 4] = [
        FundingCurrency::Crypto,
        FundingCurrency::Tnd,
        FundingCurrency::Eur,
        FundingCurrency::Usd,
    ];

    pub const MORE: [FundingCurrency; 8] = [
        FundingCurrency::Aed,
        FundingCurrency::Aud,
        FundingCurrency::Cad,
        FundingCurrency::Gbp,
        FundingCurrency::Huf,
        FundingCurrency::Nzd,
        FundingCurrency::Sgd,
        FundingCurrency::Try,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FundingCurrency::Crypto => "CRYPTO",
            FundingCurrency::Tnd => "TND",
            FundingCurrency::Eur => "EUR",
            FundingCurrency::Usd => "USD",
            FundingCurrency::Aed => "AED",
            FundingCurrency::Aud => "AUD",
            FundingCurrency::Cad => "CAD",
            FundingCurrency::Gbp => "GBP",
            FundingCurrency::Huf => "HUF",
            FundingCurrency::Nzd => "NZD",
            FundingCurrency::Sgd => "SGD",
            FundingCurrency::Try => "TRY",
        }
    }

    pub fn is_crypto(&self) -> bool {
        matches!(self, FundingCurrency::Crypto)
    }
}

impl std::fmt::Display for FundingCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for FundingCurrency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        FundingCurrency::PRIMARY
            .iter()
            .chain(FundingCurrency::MORE.iter())
            .find(|c| c.code() == upper)
            .copied()
            .ok_or_else(|| {
                CoreError::ValidationError(format!("Unsupported funding currency '{s}'"))
            })
    }
}

/// Chain used for crypto deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoNetwork {
    Pulsechain,
    Ethereum,
    Base,
    #[serde(rename = "BNB Chain")]
    BnbChain,
    Optimism,
    #[serde(rename = "Arbitrum One")]
    ArbitrumOne,
    Cronos,
    Polygon,
}

impl CryptoNetwork {
    pub const ALL: [CryptoNetwork; 8] = [
        CryptoNetwork::Pulsechain,
        CryptoNetwork::Ethereum,
        CryptoNetwork::Base,
        CryptoNetwork::BnbChain,
        CryptoNetwork::Optimism,
        CryptoNetwork::ArbitrumOne,
        CryptoNetwork::Cronos,
        CryptoNetwork::Polygon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CryptoNetwork::Pulsechain => "Pulsechain",
            CryptoNetwork::Ethereum => "Ethereum",
            CryptoNetwork::Base => "Base",
            CryptoNetwork::BnbChain => "BNB Chain",
            CryptoNetwork::Optimism => "Optimism",
            CryptoNetwork::ArbitrumOne => "Arbitrum One",
            CryptoNetwork::Cronos => "Cronos",
            CryptoNetwork::Polygon => "Polygon",
        }
    }
}

impl std::fmt::Display for CryptoNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CryptoNetwork {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CryptoNetwork::ALL
            .iter()
            .find(|n| n.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| CoreError::ValidationError(format!("Unsupported network '{s}'")))
    }
}
