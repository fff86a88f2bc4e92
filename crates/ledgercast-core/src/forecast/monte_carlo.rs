//! Monte Carlo Forecaster
//!
//! Simulates many possible spending paths by repeatedly drawing from
//! the empirical distribution of month-over-month changes and
//! compounding the draws onto the last actual month. The median path
//! is the point forecast; the P10/P90 spread of trial outcomes forms
//! the confidence band. The RNG is seeded explicitly so identical data
//! always produces identical output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::engine::{ForecastSeries, Forecaster};
use super::{mean, MonthlyHistory, EPSILON};

/// Minimum usable month-over-month changes before the percentage
/// distribution is trusted over the residual fallback
const MIN_CHANGE_SAMPLES: usize = 3;

/// Seed offset separating the backtest run from the forward run
const BACKTEST_SEED_OFFSET: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct MonteCarloForecaster {
    trials: usize,
    seed: u64,
}

/// Empirical distribution a simulation step draws from
enum StepDistribution {
    /// Relative month-over-month changes; a draw multiplies the
    /// previous value by (1 + change)
    PercentChanges(Vec<f64>),
    /// Residuals around the historical mean; a draw shifts the
    /// previous value additively
    Residuals(Vec<f64>),
}

impl StepDistribution {
    /// Build from a series: percent changes when history supports them,
    /// residuals around the mean otherwise (short or degenerate data)
    fn from_series(ys: &[f64]) -> Self {
        let changes: Vec<f64> = ys
            .windows(2)
            .filter(|w| w[0].abs() > EPSILON)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect();

        if changes.len() >= MIN_CHANGE_SAMPLES {
            Self::PercentChanges(changes)
        } else {
            let avg = mean(ys);
            Self::Residuals(ys.iter().map(|y| y - avg).collect())
        }
    }

    /// Advance one simulated month from `prev`
    fn step(&self, prev: f64, rng: &mut StdRng) -> f64 {
        let next = match self {
            Self::PercentChanges(changes) => {
                let draw = changes[rng.gen_range(0..changes.len())];
                prev * (1.0 + draw)
            }
            Self::Residuals(residuals) => {
                if residuals.is_empty() {
                    prev
                } else {
                    prev + residuals[rng.gen_range(0..residuals.len())]
                }
            }
        };
        next.max(0.0)
    }
}

impl MonteCarloForecaster {
    pub fn new(trials: usize, seed: u64) -> Self {
        Self { trials, seed }
    }

    /// Simulate `horizon` months forward from the last value of `ys`,
    /// returning (median, p10, p90) per month
    fn simulate(&self, ys: &[f64], horizon: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let last = ys.last().copied().unwrap_or(0.0);
        let distribution = StepDistribution::from_series(ys);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut outcomes: Vec<Vec<f64>> = vec![Vec::with_capacity(self.trials); horizon];
        for _ in 0..self.trials {
            let mut prev = last;
            for month in outcomes.iter_mut() {
                prev = distribution.step(prev, &mut rng);
                month.push(prev);
            }
        }

        let mut median = Vec::with_capacity(horizon);
        let mut p10 = Vec::with_capacity(horizon);
        let mut p90 = Vec::with_capacity(horizon);
        for month in &mut outcomes {
            month.sort_by(|a, b| a.partial_cmp(b).expect("finite simulated values"));
            median.push(percentile(month, 0.50));
            p10.push(percentile(month, 0.10));
            p90.push(percentile(month, 0.90));
        }

        (median, p10, p90)
    }
}

impl Forecaster for MonteCarloForecaster {
    fn name(&self) -> &'static str {
        "Monte Carlo"
    }

    fn description(&self) -> &'static str {
        "Stochastic simulation of spending paths with a P10-P90 confidence band"
    }

    fn forecast(&self, history: &MonthlyHistory, horizon: usize) -> ForecastSeries {
        let n = history.len();
        let series = &history.expenses;

        if n == 0 {
            return ForecastSeries::points_only(vec![0.0; horizon], None);
        }

        let (median, p10, p90) = self.simulate(series, horizon, self.seed);

        // Backtest the median-path method against the held-out last month,
        // on its own derived seed so the forward run stays independent
        let mae = if n >= 2 {
            let (backtest, _, _) = self.simulate(
                &series[..n - 1],
                1,
                self.seed.wrapping_add(BACKTEST_SEED_OFFSET),
            );
            Some((backtest[0] - series[n - 1]).abs())
        } else {
            None
        };

        ForecastSeries {
            points: median,
            mae,
            lower: Some(p10),
            upper: Some(p90),
        }
    }
}

/// Nearest-rank percentile over an already-sorted slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}
