use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Statistics could not be read: {0}")]
    Store(#[from] StoreError),
    #[error("Numeric overflow while summing {scope}")]
    Overflow {
        scope: &'static str
    }
}

impl StatsError {
    pub fn overflow(scope: &'static str) -> Self {
        Self::Overflow { scope }
    }
}
