mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;

use crate::engine::{BudgetError, Snapshot};
use crate::models::{Expense, SavingsRecord};
use schema::{KEY_EXPENSES, KEY_MONTHLY_SAVINGS, KEY_SALARY, KEY_SAVED_AMOUNT, KEY_SAVING_GOAL};

/// What [`Store::load`] found. Keys that failed to decode are listed in
/// `failures` and hold their default in `snapshot`.
#[derive(Debug, Default)]
pub(crate) struct Loaded {
    pub(crate) snapshot: Snapshot,
    pub(crate) failures: Vec<BudgetError>,
}

/// String-keyed persistence for the budget. Read once at startup,
/// written through after every mutation.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Database migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw keys ──────────────────────────────────────────────

    pub(crate) fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    #[cfg(test)]
    pub(crate) fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn key_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?)
    }

    // ── Budget snapshot ───────────────────────────────────────

    pub(crate) fn load(&self) -> Result<Loaded> {
        let mut failures = Vec::new();

        let salary = self
            .decode_key(KEY_SALARY, decode_setting)?
            .unwrap_or_else(|e| note_failure(&mut failures, e, None));
        let saving_goal = self
            .decode_key(KEY_SAVING_GOAL, decode_setting)?
            .unwrap_or_else(|e| note_failure(&mut failures, e, None));
        let expenses: Vec<Expense> = self
            .decode_key(KEY_EXPENSES, decode_json)?
            .unwrap_or_else(|e| note_failure(&mut failures, e, Vec::new()));
        let saved_amount = self
            .decode_key(KEY_SAVED_AMOUNT, decode_total)?
            .unwrap_or_else(|e| note_failure(&mut failures, e, Decimal::ZERO));
        let monthly_savings: Vec<SavingsRecord> = self
            .decode_key(KEY_MONTHLY_SAVINGS, decode_json)?
            .unwrap_or_else(|e| note_failure(&mut failures, e, Vec::new()));

        Ok(Loaded {
            snapshot: Snapshot {
                salary,
                saving_goal,
                expenses,
                saved_amount,
                monthly_savings,
            },
            failures,
        })
    }

    /// Writes all five keys in one transaction.
    pub(crate) fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let entries = [
            (KEY_SALARY, encode_setting(snapshot.salary)),
            (KEY_SAVING_GOAL, encode_setting(snapshot.saving_goal)),
            (
                KEY_EXPENSES,
                serde_json::to_string(&snapshot.expenses).context("Failed to encode expenses")?,
            ),
            (KEY_SAVED_AMOUNT, snapshot.saved_amount.to_string()),
            (
                KEY_MONTHLY_SAVINGS,
                serde_json::to_string(&snapshot.monthly_savings)
                    .context("Failed to encode monthly savings")?,
            ),
        ];

        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for (key, value) in &entries {
            tx.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        tracing::trace!(expenses = snapshot.expenses.len(), "budget saved");
        Ok(())
    }

    /// Deletes every stored key.
    pub(crate) fn clear(&self) -> Result<()> {
        let removed = self.conn.execute("DELETE FROM kv_store", [])?;
        tracing::info!(removed, "store cleared");
        Ok(())
    }

    /// Missing keys decode to `Ok(T::default())`.
    fn decode_key<T: Default>(
        &self,
        key: &'static str,
        decode: impl Fn(&'static str, &str) -> Result<T, BudgetError>,
    ) -> Result<Result<T, BudgetError>> {
        Ok(match self.get(key)? {
            Some(raw) => decode(key, &raw),
            None => Ok(T::default()),
        })
    }
}

fn note_failure<T>(failures: &mut Vec<BudgetError>, err: BudgetError, fallback: T) -> T {
    tracing::warn!("{err}; starting from the default");
    failures.push(err);
    fallback
}

fn encode_setting(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn decode_setting(key: &'static str, raw: &str) -> Result<Option<Decimal>, BudgetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    crate::engine::parse_amount(trimmed)
        .map(Some)
        .ok_or_else(|| BudgetError::PersistenceReadFailure {
            key,
            reason: format!("'{trimmed}' is not a non-negative number"),
        })
}

fn decode_total(key: &'static str, raw: &str) -> Result<Decimal, BudgetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).map_err(|e| BudgetError::PersistenceReadFailure {
        key,
        reason: e.to_string(),
    })
}

fn decode_json<T: DeserializeOwned>(key: &'static str, raw: &str) -> Result<T, BudgetError> {
    serde_json::from_str(raw).map_err(|e| BudgetError::PersistenceReadFailure {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests;
