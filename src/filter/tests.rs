use super::{listing_order, Clause, DateRange, FilterError, FilterParams, FilterSpec, Param, Predicate};

use anyhow::Result;
use chrono::{DateTime, Timelike};

use crate::models::{Transaction, TransactionType};
use crate::types::{Amount, Timestamp};

fn timestamp(value: &str) -> Result<Timestamp> {
    Ok(DateTime::parse_from_rfc3339(value)?)
}

fn create_transaction(id: i64, owner_id: i64, transaction_type: TransactionType, category: &str, date: &str) -> Result<Transaction> {
    let transaction_date = timestamp(date)?;

    Ok(Transaction {
        id,
        owner_id,
        amount: Amount::new(100),
        transaction_type,
        category: category.to_string(),
        description: None,
        transaction_date,
        receipt_path: None,
        created_at: transaction_date,
        updated_at: transaction_date
    })
}

#[test]
fn test_single_start_date_expands_to_the_whole_day() -> Result<()> {
    let range = DateRange::new(Some(timestamp("2024-01-05T00:00:00Z")?), None).normalize();

    assert_eq!(range.start, Some(timestamp("2024-01-05T00:00:00Z")?));
    assert_eq!(range.end, Some(timestamp("2024-01-05T23:59:59.999999999Z")?));

    Ok(())
}

#[test]
fn test_day_precision_end_date_is_inclusive_of_the_whole_day() -> Result<()> {
    let range = DateRange::new(
        Some(timestamp("2024-01-01T00:00:00Z")?),
        Some(timestamp("2024-01-31T00:00:00Z")?)
    ).normalize();

    assert_eq!(range.start, Some(timestamp("2024-01-01T00:00:00Z")?));
    assert_eq!(range.end, Some(timestamp("2024-01-31T23:59:59.999999999Z")?));

    Ok(())
}

#[test]
fn test_exact_instants_are_used_as_given() -> Result<()> {
    let start = timestamp("2024-01-05T08:30:00Z")?;
    let range = DateRange::new(Some(start), None).normalize();

    assert_eq!(range.start, Some(start));
    assert_eq!(range.end, None);

    let end = timestamp("2024-01-07T17:45:00Z")?;
    let range = DateRange::new(None, Some(end)).normalize();

    assert_eq!(range.start, None);
    assert_eq!(range.end, Some(end));

    Ok(())
}

#[test]
fn test_day_expansion_stays_in_the_boundary_offset() -> Result<()> {
    let range = DateRange::new(Some(timestamp("2024-03-10T00:00:00+05:00")?), None).normalize();
    let end = range.end.ok_or_else(|| anyhow::anyhow!("end boundary missing"))?;

    assert_eq!(end, timestamp("2024-03-10T23:59:59.999999999+05:00")?);
    assert_eq!(end.offset().local_minus_utc(), 5 * 3600);
    assert_eq!(end.nanosecond(), 999_999_999);

    Ok(())
}

#[test]
fn test_normalized_filter_keeps_other_dimensions() -> Result<()> {
    let filter = FilterSpec::new()
        .with_owner(3)
        .with_type(TransactionType::Expense)
        .with_category("food")
        .with_start(timestamp("2024-01-05T00:00:00Z")?)
        .normalized();

    assert_eq!(filter.owner_id(), Some(3));
    assert_eq!(filter.transaction_type(), Some(TransactionType::Expense));
    assert_eq!(filter.category(), Some("food"));
    assert_eq!(filter.end(), Some(timestamp("2024-01-05T23:59:59.999999999Z")?));

    Ok(())
}

#[test]
fn test_empty_filter_compiles_to_no_clauses() {
    let predicate = Predicate::compile(&FilterSpec::new());
    let sql = predicate.to_sql();

    assert!(predicate.is_empty());
    assert!(sql.where_clause.is_empty());
    assert!(sql.params.is_empty());
}

#[test]
fn test_each_present_dimension_contributes_one_parameterized_clause() -> Result<()> {
    let start = timestamp("2024-01-01T00:00:00Z")?;
    let end = timestamp("2024-01-31T23:59:59Z")?;
    let filter = FilterSpec::new()
        .with_owner(42)
        .with_type(TransactionType::Income)
        .with_category("salary")
        .with_start(start)
        .with_end(end);

    let sql = Predicate::compile(&filter).to_sql();

    assert_eq!(
        sql.where_clause,
        "WHERE t.user_id = $1 AND t.type = $2 AND t.category = $3 AND t.transaction_date >= $4 AND t.transaction_date <= $5"
    );
    assert_eq!(sql.params, vec![
        Param::Integer(42),
        Param::Text("income".to_string()),
        Param::Text("salary".to_string()),
        Param::Timestamp(start),
        Param::Timestamp(end)
    ]);

    Ok(())
}

#[test]
fn test_sparse_filter_numbers_placeholders_contiguously() {
    let filter = FilterSpec::new().with_category("rent");
    let sql = Predicate::compile(&filter).and(Clause::Type(TransactionType::Expense)).to_sql();

    assert_eq!(sql.where_clause, "WHERE t.category = $1 AND t.type = $2");
    assert_eq!(sql.params.len(), 2);
}

#[test]
fn test_hostile_values_never_reach_query_text() {
    let hostile = "food' OR '1'='1";
    let sql = Predicate::compile(&FilterSpec::new().with_category(hostile)).to_sql();

    assert!(!sql.where_clause.contains(hostile));
    assert!(!sql.where_clause.contains('\''));
    assert_eq!(sql.params, vec![Param::Text(hostile.to_string())]);
}

#[test]
fn test_layering_a_clause_leaves_the_base_predicate_untouched() {
    let base = Predicate::compile(&FilterSpec::new().with_owner(1));
    let narrowed = base.and(Clause::Type(TransactionType::Income));

    assert_eq!(base.clauses().len(), 1);
    assert_eq!(narrowed.clauses().len(), 2);
}

#[test]
fn test_predicate_matches_conjunctively() -> Result<()> {
    let filter = FilterSpec::new()
        .with_owner(1)
        .with_type(TransactionType::Expense)
        .with_start(timestamp("2024-01-05T00:00:00Z")?)
        .normalized();
    let predicate = Predicate::compile(&filter);

    assert!(predicate.matches(&create_transaction(1, 1, TransactionType::Expense, "food", "2024-01-05T12:00:00Z")?));
    assert!(!predicate.matches(&create_transaction(2, 2, TransactionType::Expense, "food", "2024-01-05T12:00:00Z")?));
    assert!(!predicate.matches(&create_transaction(3, 1, TransactionType::Income, "food", "2024-01-05T12:00:00Z")?));
    assert!(!predicate.matches(&create_transaction(4, 1, TransactionType::Expense, "food", "2024-01-06T00:00:00Z")?));

    Ok(())
}

#[test]
fn test_listing_order_is_newest_date_then_newest_record() -> Result<()> {
    let older = create_transaction(1, 1, TransactionType::Expense, "food", "2024-01-05T12:00:00Z")?;
    let newer = create_transaction(2, 1, TransactionType::Expense, "food", "2024-01-06T12:00:00Z")?;
    let mut same_date_later_record = create_transaction(3, 1, TransactionType::Expense, "food", "2024-01-05T12:00:00Z")?;
    same_date_later_record.created_at = timestamp("2024-01-07T00:00:00Z")?;

    let mut listing = vec![older.clone(), same_date_later_record.clone(), newer.clone()];
    listing.sort_by(listing_order);

    let ids: Vec<i64> = listing.iter().map(|transaction| transaction.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    Ok(())
}

#[test]
fn test_filter_params_treat_empty_values_as_absent() -> Result<()> {
    let params = FilterParams {
        user_id: Some("".to_string()),
        transaction_type: Some(" ".to_string()),
        category: Some("".to_string()),
        start_date: None,
        end_date: Some("".to_string())
    };

    assert_eq!(params.into_spec()?, FilterSpec::new());

    Ok(())
}

#[test]
fn test_filter_params_parse_dates_and_types() -> Result<()> {
    let mut params = FilterParams::default();

    assert!(params.set("type", "expense"));
    assert!(params.set("start_date", "2024-01-05"));
    assert!(params.set("end_date", "2024-01-10T18:00:00+02:00"));
    assert!(params.set("user_id", "12"));
    assert!(!params.set("sort", "asc"));

    let filter = params.into_spec()?;

    assert_eq!(filter.owner_id(), Some(12));
    assert_eq!(filter.transaction_type(), Some(TransactionType::Expense));
    assert_eq!(filter.start(), Some(timestamp("2024-01-05T00:00:00Z")?));
    assert_eq!(filter.end(), Some(timestamp("2024-01-10T18:00:00+02:00")?));

    Ok(())
}

#[test]
fn test_filter_params_reject_malformed_values() {
    let bad_date = FilterParams { start_date: Some("05/01/2024".to_string()), ..FilterParams::default() };
    let bad_type = FilterParams { transaction_type: Some("transfer".to_string()), ..FilterParams::default() };
    let bad_owner = FilterParams { user_id: Some("abc".to_string()), ..FilterParams::default() };

    assert!(matches!(bad_date.into_spec(), Err(FilterError::InvalidDate { key: "start_date", .. })));
    assert!(matches!(bad_type.into_spec(), Err(FilterError::InvalidType(_))));
    assert!(matches!(bad_owner.into_spec(), Err(FilterError::InvalidOwner(_))));
}
