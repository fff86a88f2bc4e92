//! Transaction CRUD and history queries

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

/// Minimal transaction view consumed by the forecast history loader
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    /// Raw decimal string as stored; parsed leniently by the loader
    pub amount: String,
    pub category: String,
}

impl Database {
    /// Insert a transaction and return its id
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO transactions (title, amount, date, category, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tx.title,
                tx.amount,
                tx.date.to_string(),
                tx.category,
                tx.notes
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single transaction by id
    pub fn get_transaction(&self, id: i64) -> Result<Transaction> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, title, amount, date, category, notes, created_at
             FROM transactions WHERE id = ?1",
            params![id],
            row_to_transaction,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("Transaction {} not found", id))
            }
            other => other.into(),
        })
    }

    /// List transactions, most recent first
    pub fn list_transactions(&self, limit: Option<i64>) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let limit = limit.unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(
            "SELECT id, title, amount, date, category, notes, created_at
             FROM transactions ORDER BY date DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], row_to_transaction)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete a transaction by id
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let affected = conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Transaction {} not found", id)));
        }
        Ok(())
    }

    /// Count all transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// All transactions in chronological order, as the minimal view the
    /// forecast history loader consumes
    pub fn transaction_history(&self) -> Result<Vec<TransactionRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT date, amount, category FROM transactions ORDER BY date ASC, id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(0)?;
            Ok((date_str, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (date_str, amount, category) = row?;
            // Dates are written by us as YYYY-MM-DD; tolerate bad rows
            match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => records.push(TransactionRecord {
                    date,
                    amount,
                    category,
                }),
                Err(_) => {
                    tracing::warn!(date = %date_str, "Skipping transaction with unparseable date");
                }
            }
        }

        Ok(records)
    }
}

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(3)?;
    let created_str: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        category: row.get(4)?,
        notes: row.get(5)?,
        created_at: parse_datetime(&created_str),
    })
}
