use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::filter::{Clause, FilterSpec, Predicate};
use crate::models::{Transaction, TransactionType};
use crate::stats::{AggregatedStats, StatsError, UserStat};
use crate::storage::LedgerStore;
use crate::types::{Amount, OwnerId};

/// Computes [`AggregatedStats`] straight from the ledger store.
///
/// Each part of the result is its own read against the store, all derived from one compiled
/// predicate. A write that lands between two reads can show up in one part and not another.
pub struct Aggregator<S: LedgerStore> {
    store: Arc<S>
}

impl<S: LedgerStore> Aggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Aggregates every record matched by `filter`.
    ///
    /// # Errors
    /// Any store failure fails the whole aggregation; no partial result is returned.
    pub fn aggregate(&self, filter: &FilterSpec) -> Result<AggregatedStats, StatsError> {
        let filter = filter.normalized();
        let base = Predicate::compile(&filter);

        let (total_income, total_expenses) = self.totals(&base)?;
        let by_category_income = self.category_breakdown(&base, filter.transaction_type(), TransactionType::Income)?;
        let by_category_expense = self.category_breakdown(&base, filter.transaction_type(), TransactionType::Expense)?;
        let by_user_spending = self.owner_breakdown(&base)?;

        debug!(
            "Aggregated [{}] owners with income [{total_income}] and expenses [{total_expenses}]",
            by_user_spending.len()
        );

        Ok(AggregatedStats {
            total_income,
            total_expenses,
            by_category_income,
            by_category_expense,
            by_user_spending
        })
    }

    fn totals(&self, base: &Predicate) -> Result<(Amount, Amount), StatsError> {
        let transactions = self.store.scan(base)?;

        let income = Amount::checked_sum(amounts_of(&transactions, TransactionType::Income))
            .map_err(|_| StatsError::overflow("total income"))?;
        let expenses = Amount::checked_sum(amounts_of(&transactions, TransactionType::Expense))
            .map_err(|_| StatsError::overflow("total expenses"))?;

        Ok((income, expenses))
    }

    /// Sums amounts per category for one transaction type.
    ///
    /// Without a type in the caller's filter the grouping's type is layered on top of the base
    /// predicate. With a matching type the base predicate already selects it. With the other type
    /// nothing can match and the grouping stays empty.
    fn category_breakdown(&self, base: &Predicate, requested: Option<TransactionType>, grouping: TransactionType) -> Result<BTreeMap<String, Amount>, StatsError> {
        let predicate = match requested {
            None => base.and(Clause::Type(grouping)),
            Some(transaction_type) if transaction_type == grouping => base.clone(),
            Some(_) => return Ok(BTreeMap::new())
        };

        let mut by_category = BTreeMap::<String, Amount>::new();

        for transaction in self.store.scan(&predicate)? {
            let sum = by_category.entry(transaction.category).or_default();
            *sum = sum.checked_add(transaction.amount)
                .ok_or_else(|| StatsError::overflow("category breakdown"))?;
        }

        Ok(by_category)
    }

    fn owner_breakdown(&self, base: &Predicate) -> Result<BTreeMap<OwnerId, UserStat>, StatsError> {
        let mut by_owner = BTreeMap::<OwnerId, UserStat>::new();

        for transaction in self.store.scan(base)? {
            let stat = match by_owner.entry(transaction.owner_id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let user_phone = self.store.user_phone(transaction.owner_id)?.unwrap_or_default();
                    entry.insert(UserStat {
                        user_id: transaction.owner_id,
                        user_phone,
                        total_spent: Amount::ZERO,
                        total_income: Amount::ZERO,
                        transaction_count: 0
                    })
                }
            };

            match transaction.transaction_type {
                TransactionType::Income => {
                    stat.total_income = stat.total_income.checked_add(transaction.amount)
                        .ok_or_else(|| StatsError::overflow("owner income"))?;
                }
                TransactionType::Expense => {
                    stat.total_spent = stat.total_spent.checked_add(transaction.amount)
                        .ok_or_else(|| StatsError::overflow("owner spending"))?;
                }
            }
            stat.transaction_count += 1;
        }

        Ok(by_owner)
    }
}

fn amounts_of(transactions: &[Transaction], transaction_type: TransactionType) -> impl Iterator<Item = Amount> + '_ {
    transactions.iter()
        .filter(move |transaction| transaction.transaction_type == transaction_type)
        .map(|transaction| transaction.amount)
}
