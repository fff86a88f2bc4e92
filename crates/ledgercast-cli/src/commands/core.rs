//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_add` - Record a transaction

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use ledgercast_core::db::Database;
use ledgercast_core::models::NewTransaction;

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record spending: ledgercast add \"Groceries\" 84.20 --category Food");
    println!("  2. Register income: ledgercast income add \"Salary\" 4200");
    println!("  3. See where it's headed: ledgercast forecast");

    Ok(())
}

pub fn cmd_add(
    db: &Database,
    title: &str,
    amount: &str,
    date: Option<&str>,
    category: &str,
    notes: Option<&str>,
) -> Result<()> {
    if amount.trim().parse::<f64>().is_err() {
        bail!("Amount must be a decimal number, got '{}'", amount);
    }

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => chrono::Local::now().date_naive(),
    };

    let id = db.insert_transaction(&NewTransaction {
        title: title.to_string(),
        amount: amount.trim().to_string(),
        date,
        category: category.to_string(),
        notes: notes.unwrap_or_default().to_string(),
    })?;

    println!("✅ Recorded #{}: {} {} ({}, {})", id, title, amount, category, date);

    Ok(())
}
