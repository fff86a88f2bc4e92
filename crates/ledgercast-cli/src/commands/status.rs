//! Database status command

use std::path::Path;

use anyhow::Result;

use ledgercast_core::db::Database;
use ledgercast_core::MonthlyHistory;

pub fn cmd_status(db: &Database, db_path: &Path) -> Result<()> {
    let transactions = db.count_transactions()?;
    let sources = db.list_income_sources()?;
    let history = MonthlyHistory::load(db)?;

    println!("📋 Ledgercast Status");
    println!("   ─────────────────────────────");
    println!("   Database: {}", db_path.display());
    if let Ok(meta) = std::fs::metadata(db_path) {
        println!("   Size: {:.1} KB", meta.len() as f64 / 1024.0);
    }
    println!("   Transactions: {}", transactions);
    println!(
        "   Income sources: {} ({} active)",
        sources.len(),
        sources.iter().filter(|s| s.active).count()
    );
    println!("   Months of history: {}", history.len());
    if let Some(last) = history.last_month() {
        println!("   Latest month: {}", last.format("%b %Y"));
    }

    if history.len() < 2 {
        println!();
        println!("💡 Log a couple of months of spending to unlock trend forecasts.");
    }

    Ok(())
}
