//! Insight Synthesizer
//!
//! Derives the aggregate trend, the fastest-growing category, projected
//! savings, and a recommendation sentence chosen by a small decision
//! table keyed on (history sufficiency, trend, savings sign, top-growing
//! presence). The wording is presentation; the branch selection is the
//! contract.

use super::categories::classify_trend;
use super::types::{CategoryBreakdown, ForecastInsights, Trend};
use super::{mean, round_cents, round_pct, ForecastConfig, MonthlyHistory, EPSILON};

/// Build the insights block from the ensemble projection and the
/// per-category breakdown
pub fn synthesize(
    history: &MonthlyHistory,
    ensemble: &[f64],
    breakdown: &[CategoryBreakdown],
    config: &ForecastConfig,
) -> ForecastInsights {
    let total_predicted = ensemble.iter().sum::<f64>();
    let avg_predicted = mean(ensemble);

    // Compare the predicted average against an equal-length trailing
    // window of actuals
    let n = history.len();
    let window = n.min(config.horizon.max(1));
    let trailing_avg = if window > 0 {
        mean(&history.expenses[n - window..])
    } else {
        0.0
    };

    let (trend, trend_pct) = if trailing_avg.abs() > EPSILON {
        let pct = (avg_predicted - trailing_avg) / trailing_avg * 100.0;
        (classify_trend(pct, config.trend_threshold), pct)
    } else {
        (Trend::Stable, 0.0)
    };

    let top_growing = breakdown
        .iter()
        .filter(|c| c.trend == Trend::Up && c.trend_percentage > 0.0)
        .max_by(|a, b| {
            a.trend_percentage
                .partial_cmp(&b.trend_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let monthly_income = history.monthly_income();
    let predicted_savings = monthly_income - avg_predicted;

    let recommendation = recommend(n, trend, predicted_savings, top_growing);

    ForecastInsights {
        total_predicted_spending: round_cents(total_predicted),
        avg_monthly_predicted: round_cents(avg_predicted),
        monthly_income: round_cents(monthly_income),
        predicted_savings: round_cents(predicted_savings),
        trend,
        trend_percentage: round_pct(trend_pct),
        top_growing_category: top_growing.map(|c| c.category.clone()),
        top_growing_percentage: top_growing.map(|c| c.trend_percentage).unwrap_or(0.0),
        recommendation,
    }
}

/// Decision table for the recommendation sentence
fn recommend(
    months: usize,
    trend: Trend,
    savings: f64,
    top_growing: Option<&CategoryBreakdown>,
) -> String {
    // Too little history for any of the trend branches to mean much
    if months < 2 {
        return "Not enough history for a confident forecast yet. Keep logging \
                transactions for a couple of months and projections will sharpen."
            .to_string();
    }

    let deficit = savings < 0.0;
    match (deficit, trend, top_growing) {
        (true, Trend::Up, Some(top)) => format!(
            "Projected spending exceeds your income by {:.2} per month and is \
             still climbing. {} is growing fastest ({:+.1}%) - that's the place \
             to cut first.",
            savings.abs(),
            top.category,
            top.trend_percentage
        ),
        (true, Trend::Up, None) => format!(
            "Projected spending exceeds your income by {:.2} per month and the \
             overall trend is up. Review your largest categories to close the gap.",
            savings.abs()
        ),
        (true, _, _) => format!(
            "Projected spending exceeds your income by {:.2} per month. Trimming \
             a few recurring expenses would bring the budget back into balance.",
            savings.abs()
        ),
        (false, Trend::Up, Some(top)) => format!(
            "You're still saving {:.2} per month, but spending is trending up - \
             {} most of all ({:+.1}%). Worth keeping an eye on.",
            savings, top.category, top.trend_percentage
        ),
        (false, Trend::Up, None) => format!(
            "You're still saving {:.2} per month, but overall spending is \
             trending up. Worth keeping an eye on.",
            savings
        ),
        (false, _, _) => format!(
            "Spending looks steady and you're on track to save about {:.2} per \
             month. Consider putting that surplus toward savings or investments.",
            savings
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TransactionRecord;
    use chrono::NaiveDate;

    fn history_from(totals: &[f64], income: f64) -> MonthlyHistory {
        let mut records: Vec<TransactionRecord> = totals
            .iter()
            .enumerate()
            .map(|(i, total)| TransactionRecord {
                date: NaiveDate::from_ymd_opt(2025, 1 + i as u32, 8).unwrap(),
                amount: total.to_string(),
                category: "Food".to_string(),
            })
            .collect();
        if income > 0.0 {
            for i in 0..totals.len() {
                records.push(TransactionRecord {
                    date: NaiveDate::from_ymd_opt(2025, 1 + i as u32, 1).unwrap(),
                    amount: income.to_string(),
                    category: "Income".to_string(),
                });
            }
        }
        MonthlyHistory::from_records(&records, &[])
    }

    fn growing_food() -> CategoryBreakdown {
        CategoryBreakdown {
            category: "Food".to_string(),
            average_monthly: 175.0,
            last_month: 250.0,
            predicted_next: 300.0,
            trend: Trend::Up,
            trend_percentage: 71.4,
        }
    }

    #[test]
    fn test_upward_trend_classified() {
        let history = history_from(&[1000.0, 1000.0, 1000.0], 0.0);
        let ensemble = vec![1200.0; 6];
        let insights = synthesize(&history, &ensemble, &[], &ForecastConfig::default());
        assert_eq!(insights.trend, Trend::Up);
        assert!(insights.trend_percentage > 5.0);
        assert_eq!(insights.total_predicted_spending, 7200.0);
    }

    #[test]
    fn test_surplus_stable_selects_surplus_branch() {
        let history = history_from(&[1000.0, 1000.0, 1000.0], 3000.0);
        let ensemble = vec![1000.0; 6];
        let insights = synthesize(&history, &ensemble, &[], &ForecastConfig::default());

        assert_eq!(insights.trend, Trend::Stable);
        assert!(insights.predicted_savings > 0.0);
        assert!(insights.recommendation.contains("surplus"));
    }

    #[test]
    fn test_deficit_upward_names_top_category() {
        let history = history_from(&[1000.0, 1100.0, 1200.0], 500.0);
        let ensemble = vec![1400.0; 6];
        let food = growing_food();
        let insights = synthesize(
            &history,
            &ensemble,
            std::slice::from_ref(&food),
            &ForecastConfig::default(),
        );

        assert!(insights.predicted_savings < 0.0);
        assert_eq!(insights.trend, Trend::Up);
        assert_eq!(insights.top_growing_category.as_deref(), Some("Food"));
        assert!(insights.recommendation.contains("Food"));
        assert!(insights.recommendation.contains("exceeds"));
    }

    #[test]
    fn test_no_upward_category_means_null_top() {
        let flat = CategoryBreakdown {
            category: "Rent".to_string(),
            average_monthly: 900.0,
            last_month: 900.0,
            predicted_next: 900.0,
            trend: Trend::Stable,
            trend_percentage: 0.0,
        };
        let history = history_from(&[1000.0, 1000.0], 0.0);
        let insights = synthesize(
            &history,
            &[1000.0; 6],
            std::slice::from_ref(&flat),
            &ForecastConfig::default(),
        );
        assert!(insights.top_growing_category.is_none());
        assert_eq!(insights.top_growing_percentage, 0.0);
    }

    #[test]
    fn test_insufficient_history_message() {
        let history = history_from(&[1000.0], 0.0);
        let insights = synthesize(&history, &[1000.0; 6], &[], &ForecastConfig::default());
        assert!(insights.recommendation.contains("Not enough history"));
    }

    #[test]
    fn test_savings_arithmetic() {
        let history = history_from(&[1000.0, 1000.0, 1000.0], 2500.0);
        let ensemble = vec![900.0; 6];
        let insights = synthesize(&history, &ensemble, &[], &ForecastConfig::default());
        assert_eq!(insights.monthly_income, 2500.0);
        assert_eq!(insights.avg_monthly_predicted, 900.0);
        assert_eq!(insights.predicted_savings, 1600.0);
    }
}
