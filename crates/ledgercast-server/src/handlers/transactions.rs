//! Transaction handlers - thin CRUD feeding the forecast engine

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{map_core_error, AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use ledgercast_core::models::{NewTransaction, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Maximum rows to return (newest first)
    pub limit: Option<i64>,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let limit = params.limit.map(|l| l.clamp(1, MAX_PAGE_LIMIT));
    let transactions = state.db.list_transactions(limit)?;
    Ok(Json(transactions))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(new_tx): Json<NewTransaction>,
) -> Result<Json<Transaction>, AppError> {
    if new_tx.title.trim().is_empty() {
        return Err(AppError::bad_request("Transaction title is required"));
    }
    if new_tx.amount.trim().parse::<f64>().is_err() {
        return Err(AppError::bad_request("Amount must be a decimal number"));
    }

    let id = state.db.insert_transaction(&new_tx)?;
    let transaction = state.db.get_transaction(id)?;
    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Remove a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_transaction(id).map_err(map_core_error)?;
    Ok(Json(SuccessResponse { success: true }))
}
