mod date_range;
mod errors;
mod params;
mod predicate;
#[cfg(test)]
mod tests;

use crate::models::TransactionType;
use crate::types::{OwnerId, Timestamp};

pub use date_range::DateRange;
pub use errors::FilterError;
pub use params::FilterParams;
pub use predicate::{listing_order, Clause, Param, Predicate, SqlFragment};

/// Which ledger records a listing or a statistics request covers.
///
/// Every dimension is optional. An absent dimension places no constraint on the result, present
/// dimensions are combined with logical AND. Values are immutable once built; the `with_*`
/// builders return a new specification.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FilterSpec {
    owner_id: Option<OwnerId>,
    transaction_type: Option<TransactionType>,
    category: Option<String>,
    start: Option<Timestamp>,
    end: Option<Timestamp>
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// An empty category is treated as "no constraint", never as "match the empty category".
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    /// Applies whole-day expansion to the date boundaries, leaving every other dimension as is.
    pub fn normalized(&self) -> Self {
        let range = DateRange::new(self.start, self.end).normalize();

        Self {
            start: range.start,
            end: range.end,
            ..self.clone()
        }
    }
}
