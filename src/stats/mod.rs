mod aggregator;
mod errors;

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::types::{Amount, OwnerId};

pub use aggregator::Aggregator;
pub use errors::StatsError;

/// Per-owner figures within one statistics request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct UserStat {
    pub user_id: OwnerId,
    pub user_phone: String,
    pub total_spent: Amount,
    pub total_income: Amount,
    pub transaction_count: u64
}

/// Totals and breakdowns over one filtered subset of the ledger.
///
/// Totals are dense: an empty subset yields explicit zeros. The category and owner maps are
/// sparse: a key is present only when at least one record contributed to it. The balance is
/// never stored, it is derived from the two totals on every read.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AggregatedStats {
    total_income: Amount,
    total_expenses: Amount,
    by_category_income: BTreeMap<String, Amount>,
    by_category_expense: BTreeMap<String, Amount>,
    by_user_spending: BTreeMap<OwnerId, UserStat>
}

impl AggregatedStats {
    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    /// Income minus expenses. Saturates at the `i64` bounds rather than wrapping.
    pub fn balance(&self) -> Amount {
        Amount::new(self.total_income.minor_units().saturating_sub(self.total_expenses.minor_units()))
    }

    pub fn by_category_income(&self) -> &BTreeMap<String, Amount> {
        &self.by_category_income
    }

    pub fn by_category_expense(&self) -> &BTreeMap<String, Amount> {
        &self.by_category_expense
    }

    pub fn by_user_spending(&self) -> &BTreeMap<OwnerId, UserStat> {
        &self.by_user_spending
    }
}

impl Serialize for AggregatedStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("AggregatedStats", 6)?;
        state.serialize_field("total_income", &self.total_income)?;
        state.serialize_field("total_expenses", &self.total_expenses)?;
        state.serialize_field("balance", &self.balance())?;
        state.serialize_field("by_category_income", &self.by_category_income)?;
        state.serialize_field("by_category_expense", &self.by_category_expense)?;
        state.serialize_field("by_user_spending", &self.by_user_spending)?;
        state.end()
    }
}
