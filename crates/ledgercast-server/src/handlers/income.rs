//! Income-source handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{map_core_error, AppError, AppState, SuccessResponse};
use ledgercast_core::models::{IncomeSource, NewIncomeSource};

/// Request body for updating an income source
#[derive(Debug, Deserialize)]
pub struct UpdateIncomeSourceRequest {
    pub monthly_amount: Option<String>,
    pub active: Option<bool>,
}

/// GET /api/income-sources - List all income sources
pub async fn list_income_sources(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IncomeSource>>, AppError> {
    let sources = state.db.list_income_sources()?;
    Ok(Json(sources))
}

/// POST /api/income-sources - Register a recurring income source
pub async fn create_income_source(
    State(state): State<Arc<AppState>>,
    Json(new_source): Json<NewIncomeSource>,
) -> Result<Json<IncomeSource>, AppError> {
    if new_source.name.trim().is_empty() {
        return Err(AppError::bad_request("Income source name is required"));
    }
    if new_source.monthly_amount.trim().parse::<f64>().is_err() {
        return Err(AppError::bad_request("Monthly amount must be a decimal number"));
    }

    let id = state.db.insert_income_source(&new_source)?;
    let source = state.db.get_income_source(id)?;
    Ok(Json(source))
}

/// PUT /api/income-sources/:id - Update amount and/or active flag
pub async fn update_income_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateIncomeSourceRequest>,
) -> Result<Json<IncomeSource>, AppError> {
    if let Some(ref amount) = update.monthly_amount {
        if amount.trim().parse::<f64>().is_err() {
            return Err(AppError::bad_request("Monthly amount must be a decimal number"));
        }
    }

    let source = state
        .db
        .update_income_source(id, update.monthly_amount.as_deref(), update.active)
        .map_err(map_core_error)?;
    Ok(Json(source))
}

/// DELETE /api/income-sources/:id - Remove an income source
pub async fn delete_income_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_income_source(id).map_err(map_core_error)?;
    Ok(Json(SuccessResponse { success: true }))
}
