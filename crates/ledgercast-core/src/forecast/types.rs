//! Wire-contract types for the forecast engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a spending trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Trend::Up),
            "down" => Ok(Trend::Down),
            "stable" => Ok(Trend::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// One historical month: what was spent and what the models would have
/// predicted for it (in-sample backtest view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Calendar-month key, "YYYY-MM"
    pub month: String,
    pub actual: f64,
    pub predicted: f64,
    /// Human-readable month label, e.g. "Jan 2025"
    pub label: String,
}

/// One future month of the projection
///
/// `predicted` is the ensemble blend; the per-algorithm series are kept
/// alongside for transparency and charting. The Monte Carlo fields are
/// either all present or all null (no simulation without history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub month: String,
    /// Always null for future months; kept so chart rows share a shape
    pub actual: Option<f64>,
    pub predicted: f64,
    pub predicted_lr: f64,
    pub predicted_ema: f64,
    pub predicted_mc: Option<f64>,
    pub confidence_lower: Option<f64>,
    pub confidence_upper: Option<f64>,
    pub label: String,
}

/// Per-algorithm summary for the `algorithms` map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub name: String,
    pub description: String,
    /// Backtested mean absolute error; null when history is too short
    /// to hold a month out
    pub mae: Option<f64>,
    /// Integer ensemble weight; the three algorithm weights sum to 100
    pub weight: u32,
    /// Point estimate for the immediate next month
    pub next_month: f64,
    /// "low-high" band summary (Monte Carlo only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_range: Option<String>,
}

/// Summary entry for the blended ensemble itself
///
/// Carries no `mae`/`weight`, so weight-sum invariants range over the
/// three real algorithms only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub name: String,
    pub description: String,
    pub next_month: f64,
}

/// The `algorithms` section of the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmBreakdown {
    pub linear_regression: AlgorithmResult,
    pub exponential_smoothing: AlgorithmResult,
    pub monte_carlo: AlgorithmResult,
    pub ensemble: EnsembleResult,
}

/// Per-category projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub average_monthly: f64,
    pub last_month: f64,
    pub predicted_next: f64,
    pub trend: Trend,
    pub trend_percentage: f64,
}

/// Aggregate insights derived from the projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastInsights {
    /// Sum of the ensemble prediction over the whole horizon
    pub total_predicted_spending: f64,
    pub avg_monthly_predicted: f64,
    pub monthly_income: f64,
    pub predicted_savings: f64,
    pub trend: Trend,
    pub trend_percentage: f64,
    pub top_growing_category: Option<String>,
    pub top_growing_percentage: f64,
    pub recommendation: String,
}

/// Top-level forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastOutput {
    pub monthly_data: Vec<MonthlyPoint>,
    pub predictions: Vec<PredictionPoint>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub algorithms: AlgorithmBreakdown,
    pub insights: ForecastInsights,
}
