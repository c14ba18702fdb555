#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::schema::*;
use super::*;
use crate::models::{Expense, SavingsRecord};

fn sample_snapshot() -> Snapshot {
    Snapshot {
        salary: Some(dec!(3000)),
        saving_goal: Some(dec!(500)),
        expenses: vec![
            Expense::new(1, "Coffee".into(), dec!(4.50), "2024-01-10".into(), false),
            Expense::new(2, "Tow truck".into(), dec!(180), "2024-01-11".into(), true),
        ],
        saved_amount: dec!(250),
        monthly_savings: vec![SavingsRecord {
            id: 3,
            amount: dec!(250),
            goal: Some(dec!(500)),
            goal_achieved: false,
            date: "2023-12-31".into(),
            month: "December".into(),
        }],
    }
}

// ── Load defaults ─────────────────────────────────────────────

#[test]
fn test_empty_store_loads_defaults() {
    let store = Store::open_in_memory().unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.snapshot, Snapshot::default());
    assert!(loaded.failures.is_empty());
}

#[test]
fn test_save_then_load() {
    let mut store = Store::open_in_memory().unwrap();
    let snapshot = sample_snapshot();
    store.save(&snapshot).unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.failures.is_empty());
    assert_eq!(loaded.snapshot, snapshot);
    assert_eq!(store.key_count().unwrap(), 5);
}

#[test]
fn test_save_overwrites_previous_values() {
    let mut store = Store::open_in_memory().unwrap();
    store.save(&sample_snapshot()).unwrap();

    let mut next = sample_snapshot();
    next.expenses.clear();
    next.salary = None;
    store.save(&next).unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.snapshot.expenses.is_empty());
    assert_eq!(loaded.snapshot.salary, None);
    assert_eq!(store.key_count().unwrap(), 5);
}

#[test]
fn test_unset_settings_stored_as_empty_string() {
    let mut store = Store::open_in_memory().unwrap();
    store.save(&Snapshot::default()).unwrap();
    assert_eq!(store.get(KEY_SALARY).unwrap().as_deref(), Some(""));
    assert_eq!(store.get(KEY_SAVING_GOAL).unwrap().as_deref(), Some(""));
    assert_eq!(store.get(KEY_EXPENSES).unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get(KEY_SAVED_AMOUNT).unwrap().as_deref(), Some("0"));
}

// ── Read failures ─────────────────────────────────────────────

#[test]
fn test_malformed_expenses_fall_back_to_empty() {
    let mut store = Store::open_in_memory().unwrap();
    store.save(&sample_snapshot()).unwrap();
    store.set(KEY_EXPENSES, "[{not json").unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.snapshot.expenses.is_empty());
    // other keys survive
    assert_eq!(loaded.snapshot.salary, Some(dec!(3000)));
    assert_eq!(loaded.snapshot.monthly_savings.len(), 1);
    assert_eq!(loaded.failures.len(), 1);
    assert!(matches!(
        loaded.failures[0],
        BudgetError::PersistenceReadFailure { key: "expenses", .. }
    ));
}

#[test]
fn test_malformed_scalars_fall_back() {
    let store = Store::open_in_memory().unwrap();
    store.set(KEY_SALARY, "three thousand").unwrap();
    store.set(KEY_SAVED_AMOUNT, "12abc").unwrap();
    store.set(KEY_SAVING_GOAL, "400").unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.snapshot.salary, None);
    assert_eq!(loaded.snapshot.saved_amount, Decimal::ZERO);
    assert_eq!(loaded.snapshot.saving_goal, Some(dec!(400)));
    assert_eq!(loaded.failures.len(), 2);
    assert!(loaded.failures.contains(&BudgetError::PersistenceReadFailure {
        key: KEY_SALARY,
        reason: "'three thousand' is not a non-negative number".into(),
    }));
}

#[test]
fn test_read_failure_reports_decoder_message() {
    let store = Store::open_in_memory().unwrap();
    store.set(KEY_EXPENSES, "[{not json").unwrap();

    let loaded = store.load().unwrap();
    let failure = loaded.failures[0].clone();
    assert!(matches!(
        &failure,
        BudgetError::PersistenceReadFailure { key: KEY_EXPENSES, reason }
            if reason.contains("line 1 column")
    ));
    assert!(failure
        .to_string()
        .starts_with(&format!("Stored \"{KEY_EXPENSES}\" is unreadable: ")));
}

#[test]
fn test_reads_plain_json_numbers() {
    let store = Store::open_in_memory().unwrap();
    store
        .set(
            KEY_EXPENSES,
            r#"[{"id":1700000000000,"title":"Lunch","amount":35,"date":"2024-01-09","isEmergency":false}]"#,
        )
        .unwrap();
    store
        .set(
            KEY_MONTHLY_SAVINGS,
            r#"[{"id":1,"amount":100,"goal":null,"goalAchieved":false,"date":"2023-12-31","month":"December"}]"#,
        )
        .unwrap();
    store.set(KEY_SAVED_AMOUNT, "100").unwrap();

    let loaded = store.load().unwrap();
    assert!(loaded.failures.is_empty());
    assert_eq!(loaded.snapshot.expenses[0].amount, dec!(35));
    assert_eq!(loaded.snapshot.monthly_savings[0].goal, None);
    assert_eq!(loaded.snapshot.saved_amount, dec!(100));
}

// ── Clear ─────────────────────────────────────────────────────

#[test]
fn test_clear_removes_every_key() {
    let mut store = Store::open_in_memory().unwrap();
    store.save(&sample_snapshot()).unwrap();
    store.clear().unwrap();

    assert_eq!(store.key_count().unwrap(), 0);
    assert_eq!(store.load().unwrap().snapshot, Snapshot::default());
}

// ── On disk ───────────────────────────────────────────────────

#[test]
fn test_reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybudget.db");

    {
        let mut store = Store::open(&path).unwrap();
        store.save(&sample_snapshot()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert_eq!(store.load().unwrap().snapshot, sample_snapshot());
}

#[test]
fn test_schema_version_recorded() {
    let store = Store::open_in_memory().unwrap();
    let version: i32 = store
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}
