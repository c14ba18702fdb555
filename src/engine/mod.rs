mod calendar;
mod error;
mod metrics;

use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Expense, SavingsRecord};

use calendar::remaining_days_in_month;
pub use error::{BudgetError, Result};
pub use metrics::{derive_metrics, goal_fits_salary, highest_spend_day, Metrics};

/// Everything that survives a restart. The store reads and writes exactly this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub salary: Option<Decimal>,
    pub saving_goal: Option<Decimal>,
    pub expenses: Vec<Expense>,
    pub saved_amount: Decimal,
    pub monthly_savings: Vec<SavingsRecord>,
}

/// Result of closing a month.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollover {
    pub record: SavingsRecord,
    /// Raw salary the new cycle starts from. The saving goal is not deducted here.
    pub opening_balance: Decimal,
}

/// Owns the expense list, the savings history and the budget configuration
/// for one session. Every mutation goes through the methods below; callers
/// persist [`BudgetEngine::snapshot`] after each one that succeeds.
#[derive(Debug, Clone)]
pub struct BudgetEngine {
    salary: Option<Decimal>,
    saving_goal: Option<Decimal>,
    expenses: Vec<Expense>,
    saved_amount: Decimal,
    monthly_savings: Vec<SavingsRecord>,
    remaining_days: i64,
    last_id: i64,
}

impl BudgetEngine {
    pub fn new(today: NaiveDate) -> Self {
        Self::from_snapshot(Snapshot::default(), today)
    }

    pub fn from_snapshot(snapshot: Snapshot, today: NaiveDate) -> Self {
        let last_id = snapshot
            .expenses
            .iter()
            .map(|e| e.id)
            .chain(snapshot.monthly_savings.iter().map(|s| s.id))
            .max()
            .unwrap_or(0);
        Self {
            salary: snapshot.salary,
            saving_goal: snapshot.saving_goal,
            expenses: snapshot.expenses,
            saved_amount: snapshot.saved_amount,
            monthly_savings: snapshot.monthly_savings,
            remaining_days: remaining_days_in_month(today),
            last_id,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            salary: self.salary,
            saving_goal: self.saving_goal,
            expenses: self.expenses.clone(),
            saved_amount: self.saved_amount,
            monthly_savings: self.monthly_savings.clone(),
        }
    }

    // ── Record store ──────────────────────────────────────────

    pub fn add_expense(&mut self, title: &str, amount: &str, is_emergency: bool) -> Result<&[Expense]> {
        self.add_expense_at(title, amount, is_emergency, Local::now().naive_local())
    }

    pub fn add_expense_at(
        &mut self,
        title: &str,
        amount: &str,
        is_emergency: bool,
        now: NaiveDateTime,
    ) -> Result<&[Expense]> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BudgetError::invalid("expense title is empty"));
        }
        let amount = parse_amount(amount)
            .ok_or_else(|| BudgetError::invalid(format!("'{}' is not a valid amount", amount.trim())))?;

        let id = self.next_id(now);
        let expense = Expense::new(
            id,
            title.to_string(),
            amount,
            calendar::date_label(now.date()),
            is_emergency,
        );
        tracing::debug!(id, %amount, is_emergency, "expense added");
        self.expenses.push(expense);
        Ok(&self.expenses)
    }

    /// Removes the expense with `id`. Returns whether anything was removed.
    pub fn delete_expense(&mut self, id: i64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            tracing::debug!(id, "expense deleted");
        }
        removed
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn find_expense(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn monthly_savings(&self) -> &[SavingsRecord] {
        &self.monthly_savings
    }

    pub fn saved_amount(&self) -> Decimal {
        self.saved_amount
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn salary(&self) -> Option<Decimal> {
        self.salary
    }

    pub fn saving_goal(&self) -> Option<Decimal> {
        self.saving_goal
    }

    /// Empty input clears the salary.
    pub fn set_salary(&mut self, raw: &str) -> Result<()> {
        self.salary = parse_setting("salary", raw)?;
        tracing::debug!(salary = ?self.salary, "salary updated");
        Ok(())
    }

    /// Empty input clears the saving goal.
    pub fn set_saving_goal(&mut self, raw: &str) -> Result<()> {
        self.saving_goal = parse_setting("saving goal", raw)?;
        tracing::debug!(saving_goal = ?self.saving_goal, "saving goal updated");
        Ok(())
    }

    pub fn remaining_days(&self) -> i64 {
        self.remaining_days
    }

    pub fn refresh_remaining_days(&mut self, today: NaiveDate) -> i64 {
        self.remaining_days = remaining_days_in_month(today);
        self.remaining_days
    }

    // ── Derived values ────────────────────────────────────────

    pub fn metrics(&self) -> Metrics {
        derive_metrics(
            &self.expenses,
            self.salary,
            self.saving_goal,
            self.remaining_days,
        )
    }

    pub fn highest_spend_day(&self) -> Option<(String, Decimal)> {
        highest_spend_day(&self.expenses)
    }

    pub fn goal_fits_salary(&self) -> bool {
        goal_fits_salary(self.salary, self.saving_goal)
    }

    pub fn goal_exceeds_salary(&self) -> bool {
        self.saving_goal.is_some() && !self.goal_fits_salary()
    }

    // ── Month rollover ────────────────────────────────────────

    /// Banks what is left of this month and starts a new cycle.
    /// Does nothing and returns `None` when nothing is left.
    pub fn roll_over(&mut self) -> Option<Rollover> {
        self.roll_over_at(Local::now().naive_local())
    }

    pub fn roll_over_at(&mut self, now: NaiveDateTime) -> Option<Rollover> {
        let remaining = self.metrics().remaining_salary;
        if remaining <= Decimal::ZERO {
            return None;
        }

        let (saved, goal_achieved, goal) = match self.saving_goal.filter(|g| *g > Decimal::ZERO) {
            Some(goal) => (remaining.min(goal), remaining >= goal, Some(goal)),
            None => (remaining, false, None),
        };

        let record = SavingsRecord {
            id: self.next_id(now),
            amount: saved,
            goal,
            goal_achieved,
            date: calendar::date_label(now.date()),
            month: calendar::month_label(now.date()),
        };
        self.monthly_savings.push(record.clone());
        self.saved_amount += saved;
        self.expenses.clear();

        tracing::info!(%saved, goal_achieved, total = %self.saved_amount, "month rolled over");
        Some(Rollover {
            record,
            opening_balance: self.salary.unwrap_or(Decimal::ZERO),
        })
    }

    /// Forgets every record and setting.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
        tracing::info!("all budget data reset");
    }

    fn next_id(&mut self, now: NaiveDateTime) -> i64 {
        let stamp = now.and_utc().timestamp_millis();
        self.last_id = stamp.max(self.last_id.saturating_add(1));
        self.last_id
    }
}

/// Parse a user-entered amount. Negative or non-numeric input yields `None`.
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .filter(|amount| *amount >= Decimal::ZERO)
}

fn parse_setting(field: &str, raw: &str) -> Result<Option<Decimal>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(raw)
        .map(Some)
        .ok_or_else(|| BudgetError::invalid(format!("{field} must be a non-negative number")))
}


#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;
