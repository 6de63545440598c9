use super::{Caller, NewTransaction, Role, Transaction, TransactionPatch, TransactionType, ValidationError};

use std::str::FromStr;

use anyhow::Result;
use chrono::DateTime;

use crate::types::{Amount, Timestamp};

fn timestamp(value: &str) -> Result<Timestamp> {
    Ok(DateTime::parse_from_rfc3339(value)?)
}

fn create_transaction() -> Result<Transaction> {
    let created_at = timestamp("2024-01-05T09:00:00Z")?;

    Ok(Transaction {
        id: 1,
        owner_id: 7,
        amount: Amount::new(1000),
        transaction_type: TransactionType::Expense,
        category: "food".to_string(),
        description: Some("lunch".to_string()),
        transaction_date: created_at,
        receipt_path: None,
        created_at,
        updated_at: created_at
    })
}

#[test]
fn test_transaction_type_parses_exact_lowercase_names_only() -> Result<()> {
    assert_eq!(TransactionType::from_str("income")?, TransactionType::Income);
    assert_eq!(TransactionType::from_str("expense")?, TransactionType::Expense);
    assert_eq!(
        TransactionType::from_str("INCOME"),
        Err(ValidationError::UnknownTransactionType("INCOME".to_string()))
    );
    assert_eq!(
        TransactionType::from_str("refund"),
        Err(ValidationError::UnknownTransactionType("refund".to_string()))
    );

    Ok(())
}

#[test]
fn test_new_transaction_rejects_non_positive_amounts() {
    let zero = NewTransaction::new(Amount::ZERO, TransactionType::Income, "salary");
    let negative = NewTransaction::new(Amount::new(-10), TransactionType::Income, "salary");

    assert_eq!(zero.validate(), Err(ValidationError::NonPositiveAmount(Amount::ZERO)));
    assert_eq!(negative.validate(), Err(ValidationError::NonPositiveAmount(Amount::new(-10))));
}

#[test]
fn test_new_transaction_rejects_blank_or_oversized_categories() {
    let blank = NewTransaction::new(Amount::new(1), TransactionType::Expense, "   ");
    let oversized = NewTransaction::new(Amount::new(1), TransactionType::Expense, "x".repeat(101));

    assert_eq!(blank.validate(), Err(ValidationError::EmptyCategory));
    assert_eq!(oversized.validate(), Err(ValidationError::CategoryTooLong { max: 100 }));
}

#[test]
fn test_patch_only_touches_fields_that_are_set() -> Result<()> {
    let mut transaction = create_transaction()?;
    let now = timestamp("2024-02-01T12:00:00Z")?;
    let patch = TransactionPatch {
        amount: Some(Amount::new(2500)),
        ..TransactionPatch::default()
    };

    patch.apply_to(&mut transaction, now);

    assert_eq!(transaction.amount, Amount::new(2500));
    assert_eq!(transaction.category, "food");
    assert_eq!(transaction.description.as_deref(), Some("lunch"));
    assert_eq!(transaction.updated_at, now);

    Ok(())
}

#[test]
fn test_patch_distinguishes_clearing_from_keeping_the_description() -> Result<()> {
    let mut kept = create_transaction()?;
    let mut cleared = create_transaction()?;
    let now = timestamp("2024-02-01T12:00:00Z")?;

    TransactionPatch::default().apply_to(&mut kept, now);
    TransactionPatch { description: Some(None), ..TransactionPatch::default() }.apply_to(&mut cleared, now);

    assert_eq!(kept.description.as_deref(), Some("lunch"));
    assert_eq!(cleared.description, None);

    Ok(())
}

#[test]
fn test_patch_never_moves_modification_time_before_creation() -> Result<()> {
    let mut transaction = create_transaction()?;
    let earlier = timestamp("2023-12-31T00:00:00Z")?;

    TransactionPatch::default().apply_to(&mut transaction, earlier);

    assert!(transaction.updated_at >= transaction.created_at);

    Ok(())
}

#[test]
fn test_caller_access_rules() {
    let owner = Caller::user(7);
    let stranger = Caller::user(8);
    let admin = Caller::admin(1);

    assert!(owner.may_access(7));
    assert!(!stranger.may_access(7));
    assert!(admin.may_access(7));
    assert!(!admin.owns(7));
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(owner.role, Role::User);
}

#[test]
fn test_transaction_serializes_with_external_field_names() -> Result<()> {
    let json = serde_json::to_value(create_transaction()?)?;

    assert_eq!(json["user_id"], 7);
    assert_eq!(json["type"], "expense");
    assert_eq!(json["amount"], 1000);
    assert!(json.get("receipt_path").is_none());

    Ok(())
}
