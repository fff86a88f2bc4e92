//! Exponential Smoothing Forecaster (Holt's method)
//!
//! Tracks a level and a trend component, each updated with its own
//! smoothing constant, so older observations are discounted
//! exponentially and the forecast reacts faster than a regression line
//! to recent level shifts. Future month h projects as
//! `level + h * trend`.

use super::engine::{ForecastSeries, Forecaster};
use super::MonthlyHistory;

pub struct ExponentialSmoothingForecaster {
    /// Level smoothing constant (alpha)
    alpha: f64,
    /// Trend smoothing constant (beta)
    beta: f64,
}

impl ExponentialSmoothingForecaster {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Run Holt's update over a series, returning the final
    /// (level, trend) state
    ///
    /// With a single observation the trend is zero; with exactly two,
    /// the initial trend is their difference and the level the later
    /// value (one update step from the standard initialization).
    fn fit(&self, ys: &[f64]) -> (f64, f64) {
        match ys {
            [] => (0.0, 0.0),
            [only] => (*only, 0.0),
            _ => {
                let mut level = ys[0];
                let mut trend = ys[1] - ys[0];

                for &y in &ys[1..] {
                    let prev_level = level;
                    level = self.alpha * y + (1.0 - self.alpha) * (level + trend);
                    trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
                }

                (level, trend)
            }
        }
    }
}

impl Forecaster for ExponentialSmoothingForecaster {
    fn name(&self) -> &'static str {
        "Exponential Smoothing"
    }

    fn description(&self) -> &'static str {
        "Holt's level/trend smoothing, discounting older months exponentially"
    }

    fn forecast(&self, history: &MonthlyHistory, horizon: usize) -> ForecastSeries {
        let n = history.len();
        let series = &history.expenses;

        if n < 2 {
            let level = series.first().copied().unwrap_or(0.0);
            return ForecastSeries::points_only(vec![level; horizon], None);
        }

        let (level, trend) = self.fit(series);
        let points = (1..=horizon)
            .map(|h| (level + h as f64 * trend).max(0.0))
            .collect();

        // Backtest: fit through the second-to-last month, predict the last
        let (train_level, train_trend) = self.fit(&series[..n - 1]);
        let backtest = (train_level + train_trend).max(0.0);
        let mae = (backtest - series[n - 1]).abs();

        ForecastSeries::points_only(points, Some(mae))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TransactionRecord;
    use chrono::NaiveDate;

    fn history_from(totals: &[f64]) -> MonthlyHistory {
        let records: Vec<TransactionRecord> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| TransactionRecord {
                date: NaiveDate::from_ymd_opt(2024, 1 + i as u32 % 12, 10).unwrap(),
                amount: total.to_string(),
                category: "Food".to_string(),
            })
            .collect();
        MonthlyHistory::from_records(&records, &[])
    }

    fn forecaster() -> ExponentialSmoothingForecaster {
        ExponentialSmoothingForecaster::new(0.3, 0.2)
    }

    #[test]
    fn test_two_months_trend_is_difference() {
        let (level, trend) = forecaster().fit(&[100.0, 140.0]);
        // One update step from level=100, trend=40
        assert!(level > 100.0);
        assert!(trend > 0.0);
        let series = forecaster().forecast(&history_from(&[100.0, 140.0]), 3);
        assert_eq!(series.points.len(), 3);
        // Upward trend keeps compounding with the horizon
        assert!(series.points[2] > series.points[0]);
        assert!(series.mae.is_some());
    }

    #[test]
    fn test_flat_series_projects_flat() {
        let history = history_from(&[250.0; 6]);
        let series = forecaster().forecast(&history, 6);
        for p in &series.points {
            assert!((p - 250.0).abs() < 1e-6);
        }
        assert!((series.mae.unwrap() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_reacts_to_recent_level_shift() {
        // Long flat stretch then a jump: smoothing should sit well above
        // the old level for the next month
        let history = history_from(&[100.0, 100.0, 100.0, 100.0, 100.0, 300.0]);
        let series = forecaster().forecast(&history, 1);
        assert!(series.points[0] > 100.0);
    }

    #[test]
    fn test_single_month_is_flat_with_no_mae() {
        let history = history_from(&[75.0]);
        let series = forecaster().forecast(&history, 6);
        assert_eq!(series.points, vec![75.0; 6]);
        assert!(series.mae.is_none());
    }

    #[test]
    fn test_projection_clamped_at_zero() {
        let history = history_from(&[500.0, 300.0, 100.0]);
        let series = forecaster().forecast(&history, 6);
        assert!(series.points.iter().all(|p| *p >= 0.0));
    }
}
