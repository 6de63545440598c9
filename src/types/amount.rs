use crate::types::errors::AmountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A monetary amount held as a whole number of minor currency units (cents, tiyns).
///
/// Amounts never pass through floating point. Arithmetic is checked so that sums over large
/// ledgers surface an overflow instead of wrapping.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(minor_units: i64) -> Self {
        Amount(minor_units)
    }

    pub fn minor_units(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Sums a sequence of amounts, returning `AmountError::Overflow` rather than wrapping.
    pub fn checked_sum<I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts.into_iter()
            .try_fold(Amount::ZERO, |total, amount| total.checked_add(amount))
            .ok_or(AmountError::Overflow)
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
