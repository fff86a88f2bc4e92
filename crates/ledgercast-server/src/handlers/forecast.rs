//! Forecast handler - the core surface of the API

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_HORIZON, MIN_HORIZON};
use ledgercast_core::{ForecastConfig, ForecastEngine, ForecastOutput};

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Months to project (clamped to 1-24, default 6)
    pub horizon: Option<usize>,
    /// Monte Carlo seed override, for reproducible output
    pub seed: Option<u64>,
}

/// GET /api/forecast - Run the full forecast pipeline
///
/// Loads the transaction history, runs the three forecasting strategies
/// and the ensemble, and returns the complete forecast body. A storage
/// failure yields a sanitized 500, never a partial forecast.
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastOutput>, AppError> {
    let mut config = ForecastConfig::default();
    if let Some(horizon) = params.horizon {
        config.horizon = horizon.clamp(MIN_HORIZON, MAX_HORIZON);
    }
    if let Some(seed) = params.seed {
        config.seed = seed;
    }

    let output = ForecastEngine::new(config).forecast(&state.db)?;
    Ok(Json(output))
}
