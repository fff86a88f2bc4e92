//! Ledgercast CLI - Personal spending forecaster
//!
//! Usage:
//!   ledgercast init                      Initialize database
//!   ledgercast add "Coffee" 4.50         Record a transaction
//!   ledgercast income add "Salary" 4200  Register recurring income
//!   ledgercast forecast                  Project spending forward
//!   ledgercast serve --port 3000         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            title,
            amount,
            date,
            category,
            notes,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &title,
                &amount,
                date.as_deref(),
                &category,
                notes.as_deref(),
            )
        }
        Commands::Income { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(IncomeAction::List) => commands::cmd_income_list(&db),
                Some(IncomeAction::Add { name, amount }) => {
                    commands::cmd_income_add(&db, &name, &amount)
                }
                Some(IncomeAction::Deactivate { id }) => commands::cmd_income_deactivate(&db, id),
                Some(IncomeAction::Remove { id }) => commands::cmd_income_remove(&db, id),
            }
        }
        Commands::Forecast {
            horizon,
            seed,
            json,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_forecast(&db, horizon, seed, json)
        }
        Commands::Serve {
            port,
            host,
            cors_origin,
        } => commands::cmd_serve(&cli.db, &host, port, cors_origin).await,
        Commands::Status => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_status(&db, &cli.db)
        }
    }
}
