use std::cmp::Ordering;

use crate::filter::FilterSpec;
use crate::models::{Transaction, TransactionType};
use crate::types::{OwnerId, Timestamp};

/// One typed condition on a single column.
///
/// The column and comparison operator are fixed by the variant; only the carried value varies,
/// and it is always bound as a parameter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Clause {
    Owner(OwnerId),
    Type(TransactionType),
    Category(String),
    DateFrom(Timestamp),
    DateTo(Timestamp)
}

/// A value bound to a positional query parameter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Param {
    Integer(i64),
    Text(String),
    Timestamp(Timestamp)
}

/// A `WHERE` fragment with `$n` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SqlFragment {
    pub where_clause: String,
    pub params: Vec<Param>
}

impl Clause {
    fn column(&self) -> &'static str {
        match self {
            Clause::Owner(_) => "t.user_id",
            Clause::Type(_) => "t.type",
            Clause::Category(_) => "t.category",
            Clause::DateFrom(_) | Clause::DateTo(_) => "t.transaction_date"
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Clause::DateFrom(_) => ">=",
            Clause::DateTo(_) => "<=",
            _ => "="
        }
    }

    fn param(&self) -> Param {
        match self {
            Clause::Owner(owner_id) => Param::Integer(*owner_id),
            Clause::Type(transaction_type) => Param::Text(transaction_type.as_str().to_string()),
            Clause::Category(category) => Param::Text(category.clone()),
            Clause::DateFrom(boundary) | Clause::DateTo(boundary) => Param::Timestamp(*boundary)
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Clause::Owner(owner_id) => transaction.owner_id == *owner_id,
            Clause::Type(transaction_type) => transaction.transaction_type == *transaction_type,
            Clause::Category(category) => transaction.category == *category,
            Clause::DateFrom(boundary) => transaction.transaction_date >= *boundary,
            Clause::DateTo(boundary) => transaction.transaction_date <= *boundary
        }
    }
}

/// A conjunction of clauses compiled from a [`FilterSpec`].
///
/// The same predicate drives listings and statistics, so both always cover the identical subset
/// of records. An empty predicate matches everything.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>
}

impl Predicate {
    /// Compiles one clause per present dimension. Absent dimensions contribute nothing.
    pub fn compile(filter: &FilterSpec) -> Self {
        let mut clauses = Vec::new();

        if let Some(owner_id) = filter.owner_id() {
            clauses.push(Clause::Owner(owner_id));
        }
        if let Some(transaction_type) = filter.transaction_type() {
            clauses.push(Clause::Type(transaction_type));
        }
        if let Some(category) = filter.category() {
            clauses.push(Clause::Category(category.to_string()));
        }
        if let Some(start) = filter.start() {
            clauses.push(Clause::DateFrom(start));
        }
        if let Some(end) = filter.end() {
            clauses.push(Clause::DateTo(end));
        }

        Self { clauses }
    }

    /// Returns a narrower predicate with `clause` layered on top. `self` is left untouched.
    pub fn and(&self, clause: Clause) -> Self {
        let mut clauses = self.clauses.clone();
        clauses.push(clause);

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.clauses.iter().all(|clause| clause.matches(transaction))
    }

    /// Renders the predicate for a SQL-backed store.
    ///
    /// Query text only ever contains fixed column names, operators and `$n` placeholders.
    pub fn to_sql(&self) -> SqlFragment {
        if self.clauses.is_empty() {
            return SqlFragment::default()
        }

        let conditions: Vec<String> = self.clauses.iter()
            .enumerate()
            .map(|(index, clause)| format!("{} {} ${}", clause.column(), clause.operator(), index + 1))
            .collect();

        SqlFragment {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            params: self.clauses.iter().map(Clause::param).collect()
        }
    }
}

/// Listing order shared by every store: newest transaction date first, then newest record, then
/// highest id.
pub fn listing_order(left: &Transaction, right: &Transaction) -> Ordering {
    right.transaction_date.cmp(&left.transaction_date)
        .then_with(|| right.created_at.cmp(&left.created_at))
        .then_with(|| right.id.cmp(&left.id))
}
