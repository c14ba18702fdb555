pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

pub(crate) const KEY_SALARY: &str = "salary";
pub(crate) const KEY_SAVING_GOAL: &str = "savingGoal";
pub(crate) const KEY_EXPENSES: &str = "expenses";
pub(crate) const KEY_SAVED_AMOUNT: &str = "savedAmount";
pub(crate) const KEY_MONTHLY_SAVINGS: &str = "monthlySavings";
