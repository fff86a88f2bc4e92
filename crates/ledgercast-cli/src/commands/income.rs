//! Income-source management commands

use anyhow::{bail, Result};

use ledgercast_core::db::Database;
use ledgercast_core::models::NewIncomeSource;

pub fn cmd_income_list(db: &Database) -> Result<()> {
    let sources = db.list_income_sources()?;

    if sources.is_empty() {
        println!("No income sources yet. Add one with: ledgercast income add \"Salary\" 4200");
        return Ok(());
    }

    println!("💰 Income Sources");
    println!("   ─────────────────────────────");
    for source in &sources {
        let marker = if source.active { "  " } else { "💤" };
        println!(
            "   {} #{:<4} {:<24} {}/month",
            marker,
            source.id,
            super::truncate(&source.name, 24),
            source.monthly_amount
        );
    }

    Ok(())
}

pub fn cmd_income_add(db: &Database, name: &str, amount: &str) -> Result<()> {
    if amount.trim().parse::<f64>().is_err() {
        bail!("Monthly amount must be a decimal number, got '{}'", amount);
    }

    let id = db.insert_income_source(&NewIncomeSource {
        name: name.to_string(),
        monthly_amount: amount.trim().to_string(),
        active: true,
    })?;

    println!("✅ Added income source #{}: {} at {}/month", id, name, amount);

    Ok(())
}

pub fn cmd_income_deactivate(db: &Database, id: i64) -> Result<()> {
    let source = db.update_income_source(id, None, Some(false))?;
    println!("💤 Deactivated income source #{} ({})", id, source.name);
    Ok(())
}

pub fn cmd_income_remove(db: &Database, id: i64) -> Result<()> {
    db.delete_income_source(id)?;
    println!("🗑️  Removed income source #{}", id);
    Ok(())
}
