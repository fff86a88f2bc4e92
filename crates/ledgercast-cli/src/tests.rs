//! CLI argument parsing tests

use clap::Parser;

use crate::cli::{Cli, Commands, IncomeAction};

#[test]
fn test_cli_structure_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_default_db_path() {
    let cli = Cli::parse_from(["ledgercast", "status"]);
    assert_eq!(cli.db.to_str(), Some("ledgercast.db"));
    assert!(!cli.verbose);
}

#[test]
fn test_add_parses_flags() {
    let cli = Cli::parse_from([
        "ledgercast",
        "add",
        "Coffee",
        "4.50",
        "--category",
        "Food",
        "--date",
        "2025-03-14",
    ]);
    match cli.command {
        Commands::Add {
            title,
            amount,
            date,
            category,
            ..
        } => {
            assert_eq!(title, "Coffee");
            assert_eq!(amount, "4.50");
            assert_eq!(date.as_deref(), Some("2025-03-14"));
            assert_eq!(category, "Food");
        }
        _ => panic!("expected add command"),
    }
}

#[test]
fn test_income_defaults_to_list() {
    let cli = Cli::parse_from(["ledgercast", "income"]);
    match cli.command {
        Commands::Income { action } => assert!(action.is_none()),
        _ => panic!("expected income command"),
    }

    let cli = Cli::parse_from(["ledgercast", "income", "add", "Salary", "4200"]);
    match cli.command {
        Commands::Income {
            action: Some(IncomeAction::Add { name, amount }),
        } => {
            assert_eq!(name, "Salary");
            assert_eq!(amount, "4200");
        }
        _ => panic!("expected income add command"),
    }
}

#[test]
fn test_forecast_defaults() {
    let cli = Cli::parse_from(["ledgercast", "forecast"]);
    match cli.command {
        Commands::Forecast {
            horizon,
            seed,
            json,
        } => {
            assert_eq!(horizon, 6);
            assert!(seed.is_none());
            assert!(!json);
        }
        _ => panic!("expected forecast command"),
    }
}
