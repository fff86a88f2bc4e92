//! The forecast command

use anyhow::Result;

use ledgercast_core::db::Database;
use ledgercast_core::forecast::Trend;
use ledgercast_core::{ForecastConfig, ForecastEngine};

pub fn cmd_forecast(db: &Database, horizon: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let mut config = ForecastConfig {
        horizon: horizon.clamp(1, 24),
        ..ForecastConfig::default()
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let output = ForecastEngine::new(config).forecast(db)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let trend_marker = match output.insights.trend {
        Trend::Up => "📈",
        Trend::Down => "📉",
        Trend::Stable => "➡️ ",
    };

    println!("🔮 Spending Forecast");
    println!("   ─────────────────────────────");
    for p in &output.predictions {
        match (p.confidence_lower, p.confidence_upper) {
            (Some(lower), Some(upper)) => {
                println!(
                    "   {}  {:>10.2}   ({:.2} - {:.2})",
                    p.label, p.predicted, lower, upper
                );
            }
            _ => println!("   {}  {:>10.2}", p.label, p.predicted),
        }
    }

    println!();
    println!("📊 Strategy Weights");
    println!("   ─────────────────────────────");
    let algorithms = &output.algorithms;
    for result in [
        &algorithms.linear_regression,
        &algorithms.exponential_smoothing,
        &algorithms.monte_carlo,
    ] {
        let mae = result
            .mae
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "   {:<24} weight {:>3}%   backtest error {}",
            result.name, result.weight, mae
        );
    }

    println!();
    println!(
        "{} Trend: {} ({:+.1}%)",
        trend_marker, output.insights.trend, output.insights.trend_percentage
    );
    println!(
        "   Avg predicted spending: {:.2}/month against {:.2}/month income",
        output.insights.avg_monthly_predicted, output.insights.monthly_income
    );
    println!(
        "   Projected savings: {:.2}/month",
        output.insights.predicted_savings
    );
    println!();
    println!("💡 {}", output.insights.recommendation);

    Ok(())
}
