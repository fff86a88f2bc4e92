//! Linear Regression Forecaster
//!
//! Fits an ordinary-least-squares line over (month index, total) pairs
//! and scales the projection by a per-calendar-month seasonal index:
//! the ratio of that calendar month's historical average to the overall
//! average. Calendar months with fewer than two observations keep a
//! ratio of 1.0 so sparse data cannot overfit the adjustment.

use chrono::{Datelike, NaiveDate};

use super::engine::{ForecastSeries, Forecaster};
use super::history::next_month;
use super::{mean, MonthlyHistory, EPSILON};

/// Minimum historical months before a seasonal ratio is trusted
const MIN_SEASONAL_OBSERVATIONS: usize = 2;

pub struct LinearRegressionForecaster;

impl Forecaster for LinearRegressionForecaster {
    fn name(&self) -> &'static str {
        "Linear Regression"
    }

    fn description(&self) -> &'static str {
        "Least-squares trend line with per-calendar-month seasonal adjustment"
    }

    fn forecast(&self, history: &MonthlyHistory, horizon: usize) -> ForecastSeries {
        let n = history.len();
        let series = &history.expenses;

        if n < 2 {
            // Flat fallback; too little history for a trend or a backtest
            let level = series.first().copied().unwrap_or(0.0);
            return ForecastSeries::points_only(vec![level; horizon], None);
        }

        let (intercept, slope) = ols_fit(series);
        let seasonal = seasonal_index(&history.months, series);

        let mut points = Vec::with_capacity(horizon);
        let mut month = history.last_month().expect("non-empty history");
        for h in 0..horizon {
            month = next_month(month);
            let x = (n - 1 + h + 1) as f64;
            let raw = intercept + slope * x;
            points.push((raw * seasonal[month.month0() as usize]).max(0.0));
        }

        // Backtest: refit without the last month and predict it
        let train = &series[..n - 1];
        let (ti, ts) = ols_fit(train);
        let train_seasonal = seasonal_index(&history.months[..n - 1], train);
        let held_out = history.months[n - 1];
        let backtest =
            (ti + ts * (n - 1) as f64) * train_seasonal[held_out.month0() as usize];
        let mae = (backtest.max(0.0) - series[n - 1]).abs();

        ForecastSeries::points_only(points, Some(mae))
    }
}

impl LinearRegressionForecaster {
    /// In-sample fitted values (seasonal-adjusted line evaluated at each
    /// historical month); used as the backtest view of history
    pub fn fitted(&self, history: &MonthlyHistory) -> Vec<f64> {
        let n = history.len();
        let series = &history.expenses;
        if n < 2 {
            return series.clone();
        }

        let (intercept, slope) = ols_fit(series);
        let seasonal = seasonal_index(&history.months, series);

        (0..n)
            .map(|i| {
                let raw = intercept + slope * i as f64;
                (raw * seasonal[history.months[i].month0() as usize]).max(0.0)
            })
            .collect()
    }
}

/// Ordinary least squares over x = 0..n-1; returns (intercept, slope)
pub(crate) fn ols_fit(ys: &[f64]) -> (f64, f64) {
    let n = ys.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    if n == 1 {
        return (ys[0], 0.0);
    }

    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = mean(ys);

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    let slope = if den.abs() < EPSILON { 0.0 } else { num / den };
    (y_mean - slope * x_mean, slope)
}

/// Ratio of each calendar month's average to the overall average
///
/// Indexed by zero-based calendar month (0 = January). Months with too
/// few observations, or a degenerate overall average, stay at 1.0.
fn seasonal_index(months: &[NaiveDate], ys: &[f64]) -> [f64; 12] {
    let mut index = [1.0; 12];
    let overall = mean(ys);
    if overall.abs() < EPSILON {
        return index;
    }

    let mut sums = [0.0f64; 12];
    let mut counts = [0usize; 12];
    for (month, y) in months.iter().zip(ys) {
        let m = month.month0() as usize;
        sums[m] += y;
        counts[m] += 1;
    }

    for m in 0..12 {
        if counts[m] >= MIN_SEASONAL_OBSERVATIONS {
            index[m] = (sums[m] / counts[m] as f64) / overall;
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TransactionRecord;
    use chrono::NaiveDate;

    fn history_from(totals: &[f64], start: (i32, u32)) -> MonthlyHistory {
        let records: Vec<TransactionRecord> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| {
                let month = (start.1 as usize + i - 1) % 12 + 1;
                let year = start.0 + ((start.1 as usize + i - 1) / 12) as i32;
                TransactionRecord {
                    date: NaiveDate::from_ymd_opt(year, month as u32, 15).unwrap(),
                    amount: total.to_string(),
                    category: "Food".to_string(),
                }
            })
            .collect();
        MonthlyHistory::from_records(&records, &[])
    }

    #[test]
    fn test_ols_fit_exact_line() {
        // y = 10 + 5x
        let ys = [10.0, 15.0, 20.0, 25.0];
        let (intercept, slope) = ols_fit(&ys);
        assert!((intercept - 10.0).abs() < 1e-9);
        assert!((slope - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_increasing_series_has_positive_slope() {
        let history = history_from(&[1000.0, 1050.0, 1100.0, 1150.0, 1200.0, 1250.0], (2025, 1));
        let (_, slope) = ols_fit(&history.expenses);
        assert!(slope > 0.0);

        let series = LinearRegressionForecaster.forecast(&history, 6);
        assert_eq!(series.points.len(), 6);
        // Projection continues above the last actual
        assert!(series.points[0] > 1250.0);
        assert!(series.mae.is_some());
    }

    #[test]
    fn test_single_month_is_flat_with_no_mae() {
        let history = history_from(&[500.0], (2025, 3));
        let series = LinearRegressionForecaster.forecast(&history, 4);
        assert_eq!(series.points, vec![500.0; 4]);
        assert!(series.mae.is_none());
    }

    #[test]
    fn test_seasonal_ratio_needs_two_observations() {
        // 13 months: January appears twice, every other month once
        let history = history_from(
            &[
                200.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0,
                100.0, 200.0,
            ],
            (2024, 1),
        );
        let index = seasonal_index(&history.months, &history.expenses);

        // January's two high months push its ratio above 1
        assert!(index[0] > 1.0);
        // February observed once: default ratio
        assert_eq!(index[1], 1.0);
    }

    #[test]
    fn test_projection_clamped_at_zero() {
        let history = history_from(&[300.0, 200.0, 100.0, 10.0], (2025, 1));
        let series = LinearRegressionForecaster.forecast(&history, 6);
        assert!(series.points.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn test_fitted_matches_history_length() {
        let history = history_from(&[100.0, 110.0, 120.0], (2025, 1));
        let fitted = LinearRegressionForecaster.fitted(&history);
        assert_eq!(fitted.len(), 3);
    }
}
