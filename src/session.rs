use anyhow::Result;
use chrono::NaiveDate;

use crate::engine::{BudgetEngine, BudgetError};
use crate::store::Store;

/// The engine paired with its store. Every change made through
/// [`Session::update`] is written through before control returns.
pub(crate) struct Session {
    engine: BudgetEngine,
    store: Store,
}

impl Session {
    /// Reads the store once and builds the engine from it. Unreadable keys
    /// come back as read failures; the engine starts from defaults for those.
    pub(crate) fn open(store: Store, today: NaiveDate) -> Result<(Self, Vec<BudgetError>)> {
        let loaded = store.load()?;
        let engine = BudgetEngine::from_snapshot(loaded.snapshot, today);
        tracing::info!(
            expenses = engine.expenses().len(),
            savings = engine.monthly_savings().len(),
            remaining_days = engine.remaining_days(),
            "session opened"
        );
        Ok((Self { engine, store }, loaded.failures))
    }

    pub(crate) fn engine(&self) -> &BudgetEngine {
        &self.engine
    }

    /// Run `op` against the engine, then persist the whole snapshot.
    pub(crate) fn update<T>(&mut self, op: impl FnOnce(&mut BudgetEngine) -> T) -> Result<T> {
        let out = op(&mut self.engine);
        self.store.save(&self.engine.snapshot())?;
        Ok(out)
    }

    /// Recompute the remaining days. Nothing is persisted.
    pub(crate) fn refresh_remaining_days(&mut self, today: NaiveDate) -> i64 {
        self.engine.refresh_remaining_days(today)
    }

    /// Delete every stored key and start over with defaults.
    pub(crate) fn wipe(&mut self, today: NaiveDate) -> Result<()> {
        self.store.clear()?;
        self.engine.reset(today);
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
