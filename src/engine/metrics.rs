use rust_decimal::Decimal;

use super::calendar::{days_elapsed, ASSUMED_MONTH_DAYS};
use crate::models::Expense;

/// Statistics derived from the expense list and the budget configuration.
/// Never stored; [`derive_metrics`] rebuilds the whole struct on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub total_expenses: Decimal,
    pub emergency_expenses: Decimal,
    pub expense_count: usize,
    pub emergency_count: usize,
    /// `salary - saving_goal`, may be negative when the goal exceeds the salary.
    pub available_for_spending: Decimal,
    pub remaining_salary: Decimal,
    /// Remaining salary spread over the remaining days.
    pub daily_average: Decimal,
    /// Available money spread over a fixed 30-day month.
    pub daily_spending_limit: Decimal,
    /// Available money left after expenses, spread over the remaining days.
    pub adjusted_spending_limit: Decimal,
    /// Non-emergency spending per elapsed day.
    pub actual_daily_spend: Decimal,
    /// How far the actual daily spend exceeds the daily spending limit.
    pub over_daily_limit: Decimal,
    /// Actual daily spend as a fraction of the daily spending limit, capped at 1.
    pub daily_limit_usage: Decimal,
}

impl Metrics {
    pub fn routine_expenses(&self) -> Decimal {
        self.total_expenses - self.emergency_expenses
    }

    pub fn is_over_daily_limit(&self) -> bool {
        self.over_daily_limit > Decimal::ZERO
    }

    /// The adjusted cap has dropped below the planned one.
    pub fn needs_cutback(&self) -> bool {
        self.adjusted_spending_limit < self.daily_spending_limit
    }
}

pub fn derive_metrics(
    expenses: &[Expense],
    salary: Option<Decimal>,
    saving_goal: Option<Decimal>,
    remaining_days: i64,
) -> Metrics {
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
    let emergency_expenses: Decimal = expenses
        .iter()
        .filter(|e| e.is_emergency)
        .map(|e| e.amount)
        .sum();
    let emergency_count = expenses.iter().filter(|e| e.is_emergency).count();

    let salary = salary.unwrap_or(Decimal::ZERO);
    let saving_goal = saving_goal.unwrap_or(Decimal::ZERO);
    let available_for_spending = salary - saving_goal;
    let left_after_expenses = available_for_spending - total_expenses;

    let remaining_salary = left_after_expenses.max(Decimal::ZERO);
    let daily_average = per_remaining_day(remaining_salary, remaining_days);
    let daily_spending_limit = if available_for_spending > Decimal::ZERO {
        available_for_spending / Decimal::from(ASSUMED_MONTH_DAYS)
    } else {
        Decimal::ZERO
    };
    let adjusted_spending_limit = per_remaining_day(left_after_expenses, remaining_days);

    let actual_daily_spend =
        (total_expenses - emergency_expenses) / Decimal::from(days_elapsed(remaining_days));
    let over_daily_limit = (actual_daily_spend - daily_spending_limit).max(Decimal::ZERO);
    let daily_limit_usage = if daily_spending_limit > Decimal::ZERO {
        (actual_daily_spend / daily_spending_limit).min(Decimal::ONE)
    } else if actual_daily_spend > Decimal::ZERO {
        // any routine spend against a zero allowance is a full bar
        Decimal::ONE
    } else {
        Decimal::ZERO
    };

    Metrics {
        total_expenses,
        emergency_expenses,
        expense_count: expenses.len(),
        emergency_count,
        available_for_spending,
        remaining_salary,
        daily_average,
        daily_spending_limit,
        adjusted_spending_limit,
        actual_daily_spend,
        over_daily_limit,
        daily_limit_usage,
    }
}

fn per_remaining_day(amount: Decimal, remaining_days: i64) -> Decimal {
    if remaining_days <= 0 || amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    amount / Decimal::from(remaining_days)
}

/// The calendar date with the largest summed spending. Ties go to the date
/// that first appears in the list.
pub fn highest_spend_day(expenses: &[Expense]) -> Option<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(date, _)| *date == expense.date) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.date.clone(), expense.amount)),
        }
    }

    let mut best: Option<(String, Decimal)> = None;
    for (date, total) in totals {
        let beats = match &best {
            Some((_, top)) => total > *top,
            None => true,
        };
        if beats {
            best = Some((date, total));
        }
    }
    best
}

/// A saving goal is set and the salary covers it.
pub fn goal_fits_salary(salary: Option<Decimal>, saving_goal: Option<Decimal>) -> bool {
    match saving_goal {
        Some(goal) => goal <= salary.unwrap_or(Decimal::ZERO),
        None => false,
    }
}
