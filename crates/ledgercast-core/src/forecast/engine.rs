//! Forecast Engine - runs the strategies and assembles the response
//!
//! The three forecasting strategies implement one [`Forecaster`] trait
//! so the ensemble can iterate them uniformly. Each is weighted by the
//! inverse of its backtested error; the blended series is the headline
//! prediction, with the individual series kept for transparency.

use chrono::NaiveDate;

use super::categories::project_categories;
use super::history::{month_floor, next_month};
use super::insights::synthesize;
use super::linear::LinearRegressionForecaster;
use super::monte_carlo::MonteCarloForecaster;
use super::smoothing::ExponentialSmoothingForecaster;
use super::types::{
    AlgorithmBreakdown, AlgorithmResult, EnsembleResult, ForecastOutput, MonthlyPoint,
    PredictionPoint,
};
use super::{round_cents, ForecastConfig, MonthlyHistory};
use crate::db::Database;
use crate::error::Result;

/// Inverse-error clamp: a perfect backtest (MAE 0) contributes 1/MIN_MAE
/// instead of infinity so weighting stays finite
const MIN_MAE: f64 = 1e-6;

/// One strategy's output: a point prediction per future month plus the
/// backtested error. Only Monte Carlo fills the confidence band.
#[derive(Debug, Clone)]
pub struct ForecastSeries {
    pub points: Vec<f64>,
    /// Backtested mean absolute error; None when history is too short,
    /// which excludes the strategy from the ensemble (weight 0)
    pub mae: Option<f64>,
    pub lower: Option<Vec<f64>>,
    pub upper: Option<Vec<f64>>,
}

impl ForecastSeries {
    pub fn points_only(points: Vec<f64>, mae: Option<f64>) -> Self {
        Self {
            points,
            mae,
            lower: None,
            upper: None,
        }
    }
}

/// A forecasting strategy: consumes the monthly series, produces a
/// prediction per future month and a backtest error
pub trait Forecaster {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// One-line description for the algorithms map
    fn description(&self) -> &'static str;

    /// Project `horizon` months past the end of `history`
    fn forecast(&self, history: &MonthlyHistory, horizon: usize) -> ForecastSeries;
}

/// Integer ensemble weights from backtest errors
///
/// Each defined-MAE strategy gets `(1/mae_i) / sum_j(1/mae_j) * 100`
/// rounded; undefined-MAE strategies get 0. The largest weight absorbs
/// the rounding remainder so the total is exactly 100. With no usable
/// MAE at all, weights fall back to an equal split.
pub(crate) fn ensemble_weights(maes: &[Option<f64>]) -> Vec<u32> {
    let inverses: Vec<Option<f64>> = maes
        .iter()
        .map(|mae| mae.map(|m| 1.0 / m.max(MIN_MAE)))
        .collect();
    let total: f64 = inverses.iter().flatten().sum();

    let mut weights: Vec<i64> = if total > 0.0 {
        inverses
            .iter()
            .map(|inv| match inv {
                Some(inv) => (inv / total * 100.0).round() as i64,
                None => 0,
            })
            .collect()
    } else {
        // Degenerate history: nothing to rank on
        let k = maes.len().max(1) as i64;
        vec![100 / k; maes.len()]
    };

    // Hand the rounding remainder to the largest weight
    let remainder = 100 - weights.iter().sum::<i64>();
    if let Some(largest) = weights.iter_mut().max() {
        *largest += remainder;
    }

    weights.iter().map(|w| (*w).max(0) as u32).collect()
}

/// The full forecast pipeline for one request
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Load the ledger's history and run the pipeline
    pub fn forecast(&self, db: &Database) -> Result<ForecastOutput> {
        let history = MonthlyHistory::load(db)?;
        Ok(self.run(&history))
    }

    /// Run the pipeline over already-loaded history (pure; no I/O)
    pub fn run(&self, history: &MonthlyHistory) -> ForecastOutput {
        let config = &self.config;
        let horizon = config.horizon;

        let linear = LinearRegressionForecaster;
        let smoothing =
            ExponentialSmoothingForecaster::new(config.level_smoothing, config.trend_smoothing);
        let monte_carlo = MonteCarloForecaster::new(config.trials, config.seed);

        let lr = linear.forecast(history, horizon);
        let ema = smoothing.forecast(history, horizon);
        let mc = monte_carlo.forecast(history, horizon);

        let weights = ensemble_weights(&[lr.mae, ema.mae, mc.mae]);
        tracing::debug!(
            months = history.len(),
            lr_mae = ?lr.mae,
            ema_mae = ?ema.mae,
            mc_mae = ?mc.mae,
            weights = ?weights,
            "Forecast strategies complete"
        );

        // Blended headline series: weighted average of the three point
        // forecasts (Monte Carlo contributes its median)
        let ensemble: Vec<f64> = (0..horizon)
            .map(|h| {
                (weights[0] as f64 * lr.points[h]
                    + weights[1] as f64 * ema.points[h]
                    + weights[2] as f64 * mc.points[h])
                    / 100.0
            })
            .collect();

        let monthly_data = self.assemble_monthly_data(history, &linear);
        let predictions = self.assemble_predictions(history, &ensemble, &lr, &ema, &mc);
        let category_breakdown = project_categories(history, config.trend_threshold);
        let insights = synthesize(history, &ensemble, &category_breakdown, config);
        let algorithms = assemble_algorithms(&linear, &smoothing, &monte_carlo, [&lr, &ema, &mc], &weights, &ensemble);

        ForecastOutput {
            monthly_data,
            predictions,
            category_breakdown,
            algorithms,
            insights,
        }
    }

    /// Historical months with their in-sample backtest values
    fn assemble_monthly_data(
        &self,
        history: &MonthlyHistory,
        linear: &LinearRegressionForecaster,
    ) -> Vec<MonthlyPoint> {
        let fitted = linear.fitted(history);

        history
            .months
            .iter()
            .zip(history.expenses.iter().zip(&fitted))
            .map(|(month, (actual, predicted))| MonthlyPoint {
                month: month_key(*month),
                actual: round_cents(*actual),
                predicted: round_cents(*predicted),
                label: month_label(*month),
            })
            .collect()
    }

    /// Future months: ensemble blend plus the individual series
    fn assemble_predictions(
        &self,
        history: &MonthlyHistory,
        ensemble: &[f64],
        lr: &ForecastSeries,
        ema: &ForecastSeries,
        mc: &ForecastSeries,
    ) -> Vec<PredictionPoint> {
        let mut month = self.first_forecast_month(history);

        let mut predictions = Vec::with_capacity(ensemble.len());
        for h in 0..ensemble.len() {
            let has_band = mc.lower.is_some() && mc.upper.is_some();
            predictions.push(PredictionPoint {
                month: month_key(month),
                actual: None,
                predicted: round_cents(ensemble[h]),
                predicted_lr: round_cents(lr.points[h]),
                predicted_ema: round_cents(ema.points[h]),
                predicted_mc: has_band.then(|| round_cents(mc.points[h])),
                confidence_lower: mc.lower.as_ref().map(|l| round_cents(l[h])),
                confidence_upper: mc.upper.as_ref().map(|u| round_cents(u[h])),
                label: month_label(month),
            });
            month = next_month(month);
        }

        predictions
    }

    /// The month the projection starts in: right after the last observed
    /// month, or the configured anchor (default: current month) when the
    /// history is empty
    fn first_forecast_month(&self, history: &MonthlyHistory) -> NaiveDate {
        match history.last_month() {
            Some(last) => next_month(last),
            None => month_floor(
                self.config
                    .anchor
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
            ),
        }
    }
}

fn assemble_algorithms(
    linear: &LinearRegressionForecaster,
    smoothing: &ExponentialSmoothingForecaster,
    monte_carlo: &MonteCarloForecaster,
    series: [&ForecastSeries; 3],
    weights: &[u32],
    ensemble: &[f64],
) -> AlgorithmBreakdown {
    let [lr, ema, mc] = series;
    let next = |s: &ForecastSeries| s.points.first().copied().unwrap_or(0.0);

    // Compact band summary for the immediate next month (UI copy)
    let confidence_range = match (&mc.lower, &mc.upper) {
        (Some(lower), Some(upper)) if !lower.is_empty() => Some(format!(
            "{:.2}-{:.2}",
            round_cents(lower[0]),
            round_cents(upper[0])
        )),
        _ => None,
    };

    let result = |f: &dyn Forecaster, s: &ForecastSeries, weight: u32| AlgorithmResult {
        name: f.name().to_string(),
        description: f.description().to_string(),
        mae: s.mae.map(round_cents),
        weight,
        next_month: round_cents(next(s)),
        confidence_range: None,
    };

    AlgorithmBreakdown {
        linear_regression: result(linear, lr, weights[0]),
        exponential_smoothing: result(smoothing, ema, weights[1]),
        monte_carlo: AlgorithmResult {
            confidence_range,
            ..result(monte_carlo, mc, weights[2])
        },
        ensemble: EnsembleResult {
            name: "Ensemble".to_string(),
            description: "Inverse-error weighted blend of all three strategies".to_string(),
            next_month: round_cents(ensemble.first().copied().unwrap_or(0.0)),
        },
    }
}

/// Calendar-month key, "YYYY-MM"
fn month_key(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Human-readable month label, e.g. "Jan 2025"
fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}
