//! API request handlers

mod forecast;
mod income;
mod transactions;

pub use forecast::get_forecast;
pub use income::{
    create_income_source, delete_income_source, list_income_sources, update_income_source,
};
pub use transactions::{create_transaction, delete_transaction, list_transactions};

use axum::Json;

/// GET /api/health - Liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
