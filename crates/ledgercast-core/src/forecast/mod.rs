//! The forecast engine
//!
//! Turns a user's transaction and income history into a multi-month
//! spending projection. The pipeline runs leaves-first, once per
//! request, with no shared state:
//!
//! 1. [`history::MonthlyHistory`] buckets raw records into contiguous
//!    calendar months (income split out, categories zero-filled).
//! 2. Three independent [`engine::Forecaster`] strategies each produce
//!    a point prediction per future month plus a backtested error:
//!    [`linear::LinearRegressionForecaster`],
//!    [`smoothing::ExponentialSmoothingForecaster`], and
//!    [`monte_carlo::MonteCarloForecaster`].
//! 3. [`engine::ForecastEngine`] blends them by inverse backtest error,
//!    projects each category, derives insights, and assembles the wire
//!    contract ([`types::ForecastOutput`]).

use chrono::NaiveDate;

pub mod categories;
pub mod engine;
pub mod history;
pub mod insights;
pub mod linear;
pub mod monte_carlo;
pub mod smoothing;
pub mod types;

pub use engine::{ForecastEngine, ForecastSeries, Forecaster};
pub use history::MonthlyHistory;
pub use types::{
    AlgorithmBreakdown, AlgorithmResult, CategoryBreakdown, EnsembleResult, ForecastInsights,
    ForecastOutput, MonthlyPoint, PredictionPoint, Trend,
};

/// Tunable knobs for the forecast pipeline
///
/// Defaults are the documented configuration: a 6-month horizon, 2000
/// Monte Carlo trials, Holt smoothing constants inside the 0.2-0.4
/// band, and a +/-5% trend classification threshold.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Number of future months to project
    pub horizon: usize,
    /// Monte Carlo simulation trials per request
    pub trials: usize,
    /// Holt level smoothing constant (alpha)
    pub level_smoothing: f64,
    /// Holt trend smoothing constant (beta)
    pub trend_smoothing: f64,
    /// Percentage-change threshold separating up/down from stable
    pub trend_threshold: f64,
    /// Seed for the Monte Carlo RNG; fixed so identical data yields
    /// identical output
    pub seed: u64,
    /// First forecast month when there is no history to anchor on
    /// (defaults to the current calendar month)
    pub anchor: Option<NaiveDate>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 6,
            trials: 2000,
            level_smoothing: 0.3,
            trend_smoothing: 0.2,
            trend_threshold: 5.0,
            seed: 42,
            anchor: None,
        }
    }
}

/// Values smaller than this are treated as zero in ratio math
pub(crate) const EPSILON: f64 = 1e-9;

/// Arithmetic mean; zero for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round a money value to cents for the wire contract
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a percentage to one decimal place
pub(crate) fn round_pct(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
