//! Domain models for Ledgercast

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A ledger transaction
///
/// Amounts are kept as decimal strings end to end, matching the wire
/// format clients submit. The forecast engine parses them leniently:
/// a malformed amount is skipped, never a hard error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    /// Decimal string, e.g. "42.50". Sign is not semantically meaningful.
    pub amount: String,
    pub date: NaiveDate,
    /// Free-form category name. The literal category "Income"
    /// (case-insensitive) marks income rather than spending.
    pub category: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

/// A recurring income source (salary, rent collected, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: i64,
    pub name: String,
    /// Decimal string; contributed to every calendar month while active.
    pub monthly_amount: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new income source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncomeSource {
    pub name: String,
    pub monthly_amount: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Category name that marks income transactions (matched case-insensitively)
pub const INCOME_CATEGORY: &str = "Income";

/// Returns true if the category marks an income transaction
pub fn is_income_category(category: &str) -> bool {
    category.eq_ignore_ascii_case(INCOME_CATEGORY)
}
