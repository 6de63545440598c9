mod errors;
#[cfg(test)]
mod tests;

use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::filter::{FilterParams, FilterSpec};
use crate::types::OwnerId;

pub use errors::ConfigError;

pub const USAGE: &str = "Usage: ledger-engine [input].csv [list|stats|export] [key=value ...] > [output]
Filter keys: user_id, type (income|expense), category, start_date, end_date (YYYY-MM-DD or RFC 3339)
Other keys: as_user (list one user's own transactions), log (error, warn, info, debug, trace; default: error)";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    List,
    Stats,
    Export
}

impl FromStr for Command {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "list" => Ok(Command::List),
            "stats" => Ok(Command::Stats),
            "export" => Ok(Command::Export),
            _ => Err(ConfigError::UnknownCommand(value.to_string()))
        }
    }
}

/// Everything one run of the binary needs, parsed from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: String,
    pub command: Command,
    pub filter: FilterSpec,
    pub as_user: Option<OwnerId>,
    pub log_level: LevelFilter
}

impl Config {
    /// Parses `args` as produced by `std::env::args()`, program name first.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let [_, input, command, pairs @ ..] = args else {
            return Err(ConfigError::MissingArguments)
        };

        let command = Command::from_str(command)?;
        let mut params = FilterParams::default();
        let mut as_user = None;
        let mut log_level = LevelFilter::ERROR;

        for pair in pairs {
            let (key, value) = pair.split_once('=')
                .ok_or_else(|| ConfigError::MalformedPair(pair.clone()))?;

            match key {
                "log" => log_level = parse_log_level(value),
                "as_user" => {
                    let user_id = value.trim().parse()
                        .map_err(|_| ConfigError::InvalidUser(value.to_string()))?;
                    as_user = Some(user_id);
                }
                _ => {
                    if !params.set(key, value) {
                        return Err(ConfigError::UnknownKey(key.to_string()))
                    }
                }
            }
        }

        Ok(Self {
            input: input.clone(),
            command,
            filter: params.into_spec()?,
            as_user,
            log_level
        })
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
