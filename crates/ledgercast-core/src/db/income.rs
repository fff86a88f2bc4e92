//! Income source operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{IncomeSource, NewIncomeSource};

impl Database {
    /// Insert an income source and return its id
    pub fn insert_income_source(&self, source: &NewIncomeSource) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO income_sources (name, monthly_amount, active) VALUES (?1, ?2, ?3)",
            params![source.name, source.monthly_amount, source.active],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all income sources
    pub fn list_income_sources(&self) -> Result<Vec<IncomeSource>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, monthly_amount, active, created_at
             FROM income_sources ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_income_source)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Active income sources only (the ones the forecast engine counts)
    pub fn active_income_sources(&self) -> Result<Vec<IncomeSource>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, monthly_amount, active, created_at
             FROM income_sources WHERE active = 1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_income_source)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Look up an income source by id
    pub fn get_income_source(&self, id: i64) -> Result<IncomeSource> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, name, monthly_amount, active, created_at
             FROM income_sources WHERE id = ?1",
            params![id],
            row_to_income_source,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("Income source {} not found", id))
            }
            other => other.into(),
        })
    }

    /// Update an income source's amount and active flag
    pub fn update_income_source(
        &self,
        id: i64,
        monthly_amount: Option<&str>,
        active: Option<bool>,
    ) -> Result<IncomeSource> {
        let conn = self.conn()?;

        if let Some(amount) = monthly_amount {
            conn.execute(
                "UPDATE income_sources SET monthly_amount = ?1 WHERE id = ?2",
                params![amount, id],
            )?;
        }
        if let Some(active) = active {
            conn.execute(
                "UPDATE income_sources SET active = ?1 WHERE id = ?2",
                params![active, id],
            )?;
        }

        conn.query_row(
            "SELECT id, name, monthly_amount, active, created_at
             FROM income_sources WHERE id = ?1",
            params![id],
            row_to_income_source,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::NotFound(format!("Income source {} not found", id))
            }
            other => other.into(),
        })
    }

    /// Delete an income source by id
    pub fn delete_income_source(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let affected = conn.execute("DELETE FROM income_sources WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::NotFound(format!("Income source {} not found", id)));
        }
        Ok(())
    }
}

fn row_to_income_source(row: &rusqlite::Row<'_>) -> rusqlite::Result<IncomeSource> {
    let created_str: String = row.get(4)?;

    Ok(IncomeSource {
        id: row.get(0)?,
        name: row.get(1)?,
        monthly_amount: row.get(2)?,
        active: row.get(3)?,
        created_at: parse_datetime(&created_str),
    })
}
