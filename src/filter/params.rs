use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::filter::{FilterError, FilterSpec};
use crate::models::TransactionType;
use crate::types::{OwnerId, Timestamp};

/// Raw, unvalidated filter values as they arrive in a query string.
///
/// Empty values are treated exactly like missing ones.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FilterParams {
    pub user_id: Option<String>,
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>
}

impl FilterParams {
    /// Records a single `key=value` pair. Returns `false` when the key is not a filter dimension.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "user_id" => &mut self.user_id,
            "type" => &mut self.transaction_type,
            "category" => &mut self.category,
            "start_date" => &mut self.start_date,
            "end_date" => &mut self.end_date,
            _ => return false
        };

        *slot = Some(value.to_string());
        true
    }

    /// Validates every present value and builds the corresponding specification.
    pub fn into_spec(self) -> Result<FilterSpec, FilterError> {
        let mut filter = FilterSpec::new();

        if let Some(value) = present(self.user_id) {
            let owner_id: OwnerId = value.trim().parse()
                .map_err(|_| FilterError::InvalidOwner(value.clone()))?;
            filter = filter.with_owner(owner_id);
        }
        if let Some(value) = present(self.transaction_type) {
            filter = filter.with_type(TransactionType::from_str(value.trim())?);
        }
        if let Some(value) = present(self.category) {
            filter = filter.with_category(value);
        }
        if let Some(value) = present(self.start_date) {
            filter = filter.with_start(parse_boundary("start_date", &value)?);
        }
        if let Some(value) = present(self.end_date) {
            filter = filter.with_end(parse_boundary("end_date", &value)?);
        }

        Ok(filter)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_boundary(key: &'static str, value: &str) -> Result<Timestamp, FilterError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
    }

    DateTime::parse_from_rfc3339(value)
        .map_err(|_| FilterError::InvalidDate { key, value: value.to_string() })
}
