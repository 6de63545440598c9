use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum FilterError {
    #[error("Filter error: [{key}] has an invalid date [{value}], expected YYYY-MM-DD or RFC 3339")]
    InvalidDate {
        key: &'static str,
        value: String
    },
    #[error("Filter error: [user_id] has an invalid value [{0}]")]
    InvalidOwner(String),
    #[error("Filter error: {0}")]
    InvalidType(#[from] ValidationError)
}
