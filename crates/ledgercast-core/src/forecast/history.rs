//! History Loader
//!
//! Buckets raw transactions into contiguous calendar months, splitting
//! income-tagged entries out from spending and zero-filling any gap
//! months so the trend math always sees a regular series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::mean;
use crate::db::{Database, TransactionRecord};
use crate::error::Result;
use crate::models::{is_income_category, IncomeSource};

/// Chronologically ordered monthly aggregates for one user
///
/// `months`, `expenses` and `income` are aligned: index `i` describes
/// the calendar month `months[i]` (first-of-month key). Category series
/// are zero-filled over the same month range and exclude income.
#[derive(Debug, Clone, Default)]
pub struct MonthlyHistory {
    pub months: Vec<NaiveDate>,
    pub expenses: Vec<f64>,
    pub income: Vec<f64>,
    pub categories: BTreeMap<String, Vec<f64>>,
    /// Sum of active recurring income sources (already folded into
    /// `income`, kept for the no-history fallback)
    pub recurring_income: f64,
}

impl MonthlyHistory {
    /// Load and bucket the full transaction history plus active income
    /// sources for the current ledger
    pub fn load(db: &Database) -> Result<Self> {
        let records = db.transaction_history()?;
        let sources = db.active_income_sources()?;
        Ok(Self::from_records(&records, &sources))
    }

    /// Bucket already-loaded records into monthly aggregates
    pub fn from_records(records: &[TransactionRecord], sources: &[IncomeSource]) -> Self {
        let recurring_income: f64 = sources
            .iter()
            .filter(|s| s.active)
            .filter_map(|s| parse_amount(&s.monthly_amount))
            .map(f64::abs)
            .sum();

        let mut history = Self {
            recurring_income,
            ..Self::default()
        };

        // Month range spans the earliest to the latest observed month;
        // gaps in between are materialized as zero months.
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for record in records {
            let m = month_floor(record.date);
            bounds = Some(match bounds {
                None => (m, m),
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
            });
        }

        let Some((first, last)) = bounds else {
            return history;
        };

        let mut month = first;
        while month <= last {
            history.months.push(month);
            month = next_month(month);
        }
        let n = history.months.len();
        history.expenses = vec![0.0; n];
        history.income = vec![recurring_income; n];

        let mut skipped = 0usize;
        for record in records {
            let Some(amount) = parse_amount(&record.amount) else {
                skipped += 1;
                continue;
            };
            // Sign carries no meaning in the source data
            let amount = amount.abs();
            let idx = month_index(first, record.date);

            if is_income_category(&record.category) {
                history.income[idx] += amount;
            } else {
                history.expenses[idx] += amount;
                let series = history
                    .categories
                    .entry(record.category.clone())
                    .or_insert_with(|| vec![0.0; n]);
                series[idx] += amount;
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped transactions with malformed amounts");
        }

        history
    }

    /// Number of historical months observed
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Most recent historical month, if any
    pub fn last_month(&self) -> Option<NaiveDate> {
        self.months.last().copied()
    }

    /// Average monthly income (recurring sources plus income-tagged
    /// transactions); falls back to the recurring total when no months
    /// have been observed
    pub fn monthly_income(&self) -> f64 {
        if self.income.is_empty() {
            self.recurring_income
        } else {
            mean(&self.income)
        }
    }
}

/// Parse a decimal-string amount leniently; None for malformed values
fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// First day of the month containing `date`
pub(crate) fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("valid first-of-month")
}

/// First day of the month after `month`
pub(crate) fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, m) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, m, 1).expect("valid first-of-month")
}

/// Offset in whole months of `date` from the month containing `start`
fn month_index(start: NaiveDate, date: NaiveDate) -> usize {
    let months = (date.year() - start.year()) * 12 + date.month() as i32 - start.month() as i32;
    months.max(0) as usize
}
