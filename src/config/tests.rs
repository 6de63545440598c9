use super::{parse_log_level, Command, Config, ConfigError};

use anyhow::Result;
use tracing::level_filters::LevelFilter;

use crate::models::TransactionType;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn test_config_parses_command_filters_and_log_level() -> Result<()> {
    let config = Config::from_args(&args(&[
        "ledger-engine", "ledger.csv", "stats", "type=income", "user_id=4", "start_date=2024-01-05", "log=debug"
    ]))?;

    assert_eq!(config.input, "ledger.csv");
    assert_eq!(config.command, Command::Stats);
    assert_eq!(config.filter.transaction_type(), Some(TransactionType::Income));
    assert_eq!(config.filter.owner_id(), Some(4));
    assert!(config.filter.start().is_some());
    assert_eq!(config.as_user, None);
    assert_eq!(config.log_level, LevelFilter::DEBUG);

    Ok(())
}

#[test]
fn test_config_defaults_to_error_logging_and_no_filter() -> Result<()> {
    let config = Config::from_args(&args(&["ledger-engine", "ledger.csv", "LIST"]))?;

    assert_eq!(config.command, Command::List);
    assert_eq!(config.log_level, LevelFilter::ERROR);
    assert_eq!(config.filter.owner_id(), None);

    Ok(())
}

#[test]
fn test_config_rejects_bad_input() {
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv"])), Err(ConfigError::MissingArguments)));
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv", "sum"])), Err(ConfigError::UnknownCommand(_))));
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv", "list", "type"])), Err(ConfigError::MalformedPair(_))));
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv", "list", "sort=asc"])), Err(ConfigError::UnknownKey(_))));
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv", "list", "as_user=me"])), Err(ConfigError::InvalidUser(_))));
    assert!(matches!(Config::from_args(&args(&["ledger-engine", "ledger.csv", "list", "end_date=tomorrow"])), Err(ConfigError::Filter(_))));
}

#[test]
fn test_unknown_log_levels_fall_back_to_error() {
    assert_eq!(parse_log_level("TRACE"), LevelFilter::TRACE);
    assert_eq!(parse_log_level("loud"), LevelFilter::ERROR);
}
