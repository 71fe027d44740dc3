use crate::models::currency::DisplayCurrency;

/// Fixed USD → TND rate used for display. Not a market rate.
pub const TND_PER_USD: f64 = 3.07;

/// Converts the USD portfolio balance into the selected display currency.
///
/// A single multiplicative constant; no rate lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert a USD amount to `currency`.
    /// E.g., to_display(100.0, TND) → 307.0
    pub fn to_display(&self, usd_amount: f64, currency: DisplayCurrency) -> f64 {
        match currency {
            DisplayCurrency::USD => usd_amount,
            DisplayCurrency::TND => usd_amount * TND_PER_USD,
        }
    }

    /// Render a USD amount in `currency`, e.g. `"12,345.60 USD"`.
    pub fn format_balance(&self, usd_amount: f64, currency: DisplayCurrency) -> String {
        let value = self.to_display(usd_amount, currency);
        format!("{} {}", group_thousands(value), currency)
    }
}

/// Two-decimal rendering with comma thousands separators.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
