//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ledgercast - Forecast where your spending is headed
#[derive(Parser)]
#[command(name = "ledgercast")]
#[command(about = "Self-hosted personal spending forecaster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "ledgercast.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// What the money went to (or came from)
        title: String,

        /// Amount as a decimal, e.g. 42.50
        amount: String,

        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Spending category; use "Income" for money coming in
        #[arg(short, long, default_value = "Uncategorized")]
        category: String,

        /// Free-form note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Manage recurring income sources
    Income {
        #[command(subcommand)]
        action: Option<IncomeAction>,
    },

    /// Project spending forward
    Forecast {
        /// Months to project (1-24)
        #[arg(long, default_value = "6")]
        horizon: usize,

        /// Monte Carlo seed, for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the full forecast body as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable; default is same-origin only)
        #[arg(long)]
        cors_origin: Vec<String>,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// List income sources
    List,

    /// Register a recurring income source
    Add {
        /// Source name, e.g. "Salary"
        name: String,

        /// Monthly amount as a decimal
        amount: String,
    },

    /// Mark an income source inactive (kept for history)
    Deactivate {
        /// Income source ID
        id: i64,
    },

    /// Delete an income source
    Remove {
        /// Income source ID
        id: i64,
    },
}
