use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Aggregation granularity selected for the balance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Last four balance samples, labelled by day of month
    Daily,
    /// Four fixed buckets, "Week 1".."Week 4"
    Weekly,
    /// Last four balance samples, labelled by month
    #[default]
    Monthly,
    /// Every balance sample, labelled by year
    All,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
        Timeframe::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::All => "all",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            "all" => Ok(Timeframe::All),
            other => Err(CoreError::ValidationError(format!(
                "Unknown timeframe '{other}': expected daily, weekly, monthly or all"
            ))),
        }
    }
}

/// Running balance after one processed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// Date string of the transaction that produced this balance
    pub date: String,

    /// Balance after applying the transaction
    pub balance: f64,
}

/// Chart-ready balance series plus the performance figure.
///
/// All numbers are computed here; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// X-axis labels, one per value
    pub labels: Vec<String>,

    /// Balance samples
    pub values: Vec<f64>,

    /// Return on principal in percent, full precision
    pub performance_percent: f64,
}

impl ChartSeries {
    /// The defined empty state: no samples, zero performance.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Performance rounded to two decimal places.
    pub fn rounded_performance(&self) -> f64 {
        (self.performance_percent * 100.0).round() / 100.0
    }

    /// Performance as shown on the dashboard, e.g. `+12.50%` or `-10.00%`.
    pub fn display_performance(&self) -> String {
        let rounded = self.rounded_performance();
        // avoid rendering "-0.00%"
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let sign = if rounded > 0.0 { "+" } else { "" };
        format!("{sign}{rounded:.2}%")
    }

    /// Iterate `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
