//! Category Projector
//!
//! A lighter-weight version of the trend logic applied per spending
//! category: average, last actual, a linear projection for next month
//! (no seasonal adjustment, categories rarely have enough history for
//! it), and an up/down/stable classification.

use super::linear::ols_fit;
use super::types::{CategoryBreakdown, Trend};
use super::{mean, round_cents, round_pct, MonthlyHistory, EPSILON};

/// Classify a percentage change against the configured threshold
pub(crate) fn classify_trend(pct: f64, threshold: f64) -> Trend {
    if pct >= threshold {
        Trend::Up
    } else if pct <= -threshold {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Project every category series; sorted descending by `predicted_next`
/// so "top N" displays fall out naturally. The income category never
/// appears here (the history loader keeps it out of category series).
pub fn project_categories(history: &MonthlyHistory, threshold: f64) -> Vec<CategoryBreakdown> {
    let mut breakdown: Vec<CategoryBreakdown> = history
        .categories
        .iter()
        .map(|(category, series)| project_category(category, series, threshold))
        .collect();

    breakdown.sort_by(|a, b| {
        b.predicted_next
            .partial_cmp(&a.predicted_next)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

fn project_category(category: &str, series: &[f64], threshold: f64) -> CategoryBreakdown {
    let n = series.len();
    let average = mean(series);
    let last = series.last().copied().unwrap_or(0.0);

    // Single data point: no trend to speak of
    if n < 2 {
        return CategoryBreakdown {
            category: category.to_string(),
            average_monthly: round_cents(average),
            last_month: round_cents(last),
            predicted_next: round_cents(last),
            trend: Trend::Stable,
            trend_percentage: 0.0,
        };
    }

    let (intercept, slope) = ols_fit(series);
    let predicted_next = (intercept + slope * n as f64).max(0.0);

    let (trend, pct) = if average.abs() > EPSILON {
        let pct = (predicted_next - average) / average * 100.0;
        (classify_trend(pct, threshold), pct)
    } else {
        (Trend::Stable, 0.0)
    };

    CategoryBreakdown {
        category: category.to_string(),
        average_monthly: round_cents(average),
        last_month: round_cents(last),
        predicted_next: round_cents(predicted_next),
        trend,
        trend_percentage: round_pct(pct),
    }
}
