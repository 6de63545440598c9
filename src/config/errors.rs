use thiserror::Error;

use crate::filter::FilterError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing arguments, an input file and a command are required")]
    MissingArguments,
    #[error("Unknown command [{0}], expected list, stats or export")]
    UnknownCommand(String),
    #[error("Argument [{0}] is not a key=value pair")]
    MalformedPair(String),
    #[error("Unknown key [{0}]")]
    UnknownKey(String),
    #[error("[as_user] has an invalid value [{0}]")]
    InvalidUser(String),
    #[error("{0}")]
    Filter(#[from] FilterError)
}
