//! Ledgercast Core Library
//!
//! Shared functionality for the Ledgercast spending forecaster:
//! - Database access and migrations (transactions, income sources)
//! - The forecast engine: monthly history loading, three forecasting
//!   strategies (linear regression, Holt exponential smoothing, Monte
//!   Carlo simulation), inverse-error ensemble blending, per-category
//!   projections, and derived insights

pub mod db;
pub mod error;
pub mod forecast;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use forecast::{
    ForecastConfig, ForecastEngine, ForecastOutput, MonthlyHistory, Trend,
};
pub use models::{IncomeSource, NewIncomeSource, NewTransaction, Transaction};
