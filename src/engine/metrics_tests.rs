#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::metrics::*;
use crate::models::Expense;

fn expense(id: i64, amount: Decimal, date: &str, is_emergency: bool) -> Expense {
    Expense::new(id, format!("item {id}"), amount, date.into(), is_emergency)
}

// ── derive_metrics ────────────────────────────────────────────

#[test]
fn test_end_to_end_example() {
    let expenses = vec![expense(1, dec!(200), "2024-01-12", false)];
    let m = derive_metrics(&expenses, Some(dec!(3000)), Some(dec!(500)), 20);

    assert_eq!(m.total_expenses, dec!(200));
    assert_eq!(m.available_for_spending, dec!(2500));
    assert_eq!(m.remaining_salary, dec!(2300));
    assert_eq!(m.daily_average, dec!(115));
    assert_eq!(m.daily_spending_limit.round_dp(2), dec!(83.33));
    assert_eq!(m.adjusted_spending_limit, dec!(115));
    // 200 over max(30 - 20, 1) = 10 elapsed days
    assert_eq!(m.actual_daily_spend, dec!(20));
    assert!(!m.is_over_daily_limit());
}

#[test]
fn test_empty_everything_is_zero() {
    let m = derive_metrics(&[], None, None, 20);
    assert_eq!(m, Metrics::default());
}

#[test]
fn test_remaining_salary_formula() {
    let cases = [
        (Some(dec!(3000)), Some(dec!(500)), dec!(700), dec!(1800)),
        (Some(dec!(3000)), None, dec!(700), dec!(2300)),
        (None, None, dec!(700), Decimal::ZERO),
        (Some(dec!(1000)), Some(dec!(800)), dec!(300), Decimal::ZERO),
        (Some(dec!(1000)), Some(dec!(0)), dec!(0), dec!(1000)),
    ];
    for (salary, goal, spent, expected) in cases {
        let expenses = vec![expense(1, spent, "2024-01-01", false)];
        let m = derive_metrics(&expenses, salary, goal, 15);
        assert_eq!(
            m.remaining_salary, expected,
            "salary={salary:?} goal={goal:?} spent={spent}"
        );
    }
}

#[test]
fn test_available_may_go_negative() {
    let m = derive_metrics(&[], Some(dec!(1000)), Some(dec!(1500)), 10);
    assert_eq!(m.available_for_spending, dec!(-500));
    assert_eq!(m.remaining_salary, Decimal::ZERO);
    assert_eq!(m.daily_spending_limit, Decimal::ZERO);
    assert_eq!(m.adjusted_spending_limit, Decimal::ZERO);
}

#[test]
fn test_zero_remaining_days_guarded() {
    let m = derive_metrics(&[], Some(dec!(3000)), None, 0);
    assert_eq!(m.daily_average, Decimal::ZERO);
    assert_eq!(m.adjusted_spending_limit, Decimal::ZERO);
    assert_eq!(m.daily_spending_limit, dec!(100));

    let m = derive_metrics(&[], Some(dec!(3000)), None, -3);
    assert_eq!(m.daily_average, Decimal::ZERO);
}

#[test]
fn test_daily_limit_ignores_real_month_length() {
    // 31 remaining days still divides the planned limit by 30
    let m = derive_metrics(&[], Some(dec!(3100)), None, 31);
    assert_eq!(m.daily_spending_limit.round_dp(2), dec!(103.33));
    assert_eq!(m.adjusted_spending_limit, dec!(100));
}

#[test]
fn test_emergency_excluded_from_daily_rate_only() {
    let expenses = vec![
        expense(1, dec!(100), "2024-01-05", false),
        expense(2, dec!(400), "2024-01-06", true),
    ];
    let m = derive_metrics(&expenses, Some(dec!(3000)), Some(dec!(500)), 25);

    assert_eq!(m.total_expenses, dec!(500));
    assert_eq!(m.emergency_expenses, dec!(400));
    assert_eq!(m.routine_expenses(), dec!(100));
    assert_eq!(m.emergency_count, 1);
    assert_eq!(m.expense_count, 2);
    assert_eq!(m.remaining_salary, dec!(2000));
    // 100 non-emergency over 5 elapsed days
    assert_eq!(m.actual_daily_spend, dec!(20));
    assert_eq!(m.adjusted_spending_limit, dec!(80));
    assert!(m.needs_cutback());
}

#[test]
fn test_elapsed_days_floor_at_one() {
    let expenses = vec![expense(1, dec!(90), "2024-01-01", false)];
    let m = derive_metrics(&expenses, Some(dec!(3000)), None, 31);
    assert_eq!(m.actual_daily_spend, dec!(90));
}

#[test]
fn test_over_daily_limit_and_usage() {
    // limit = 300 / 30 = 10 per day, spent 150 over 10 days = 15 per day
    let expenses = vec![expense(1, dec!(150), "2024-01-10", false)];
    let m = derive_metrics(&expenses, Some(dec!(300)), None, 20);
    assert_eq!(m.daily_spending_limit, dec!(10));
    assert_eq!(m.actual_daily_spend, dec!(15));
    assert_eq!(m.over_daily_limit, dec!(5));
    assert!(m.is_over_daily_limit());
    assert_eq!(m.daily_limit_usage, Decimal::ONE);

    let expenses = vec![expense(1, dec!(50), "2024-01-10", false)];
    let m = derive_metrics(&expenses, Some(dec!(300)), None, 20);
    assert_eq!(m.daily_limit_usage, dec!(0.5));
    assert_eq!(m.over_daily_limit, Decimal::ZERO);
}

#[test]
fn test_usage_without_limit() {
    let expenses = vec![expense(1, dec!(50), "2024-01-10", false)];
    let m = derive_metrics(&expenses, None, None, 20);
    assert_eq!(m.daily_limit_usage, Decimal::ONE);
    assert_eq!(derive_metrics(&[], None, None, 20).daily_limit_usage, Decimal::ZERO);
}

#[test]
fn test_goal_equal_to_salary_fills_usage_bar() {
    let expenses = vec![expense(1, dec!(50), "2024-01-10", false)];
    let m = derive_metrics(&expenses, Some(dec!(500)), Some(dec!(500)), 20);
    assert_eq!(m.daily_spending_limit, Decimal::ZERO);
    assert_eq!(m.daily_limit_usage, Decimal::ONE);
    assert!(m.is_over_daily_limit());
    assert!(goal_fits_salary(Some(dec!(500)), Some(dec!(500))));

    // an emergency alone does not count against the zero allowance
    let expenses = vec![expense(1, dec!(50), "2024-01-10", true)];
    let m = derive_metrics(&expenses, Some(dec!(500)), Some(dec!(500)), 20);
    assert_eq!(m.daily_limit_usage, Decimal::ZERO);
}

// ── highest_spend_day ─────────────────────────────────────────

#[test]
fn test_highest_spend_day_sums_per_date() {
    let expenses = vec![
        expense(1, dec!(40), "2024-01-02", false),
        expense(2, dec!(70), "2024-01-03", false),
        expense(3, dec!(45), "2024-01-02", true),
    ];
    assert_eq!(
        highest_spend_day(&expenses),
        Some(("2024-01-02".to_string(), dec!(85)))
    );
}

#[test]
fn test_highest_spend_day_tie_keeps_first() {
    let expenses = vec![
        expense(1, dec!(10), "2024-01-05", false),
        expense(2, dec!(10), "2024-01-01", false),
    ];
    assert_eq!(
        highest_spend_day(&expenses),
        Some(("2024-01-05".to_string(), dec!(10)))
    );
}

#[test]
fn test_highest_spend_day_empty() {
    assert_eq!(highest_spend_day(&[]), None);
}

// ── goal_fits_salary ──────────────────────────────────────────

#[test]
fn test_goal_fits_salary() {
    assert!(goal_fits_salary(Some(dec!(3000)), Some(dec!(500))));
    assert!(goal_fits_salary(Some(dec!(500)), Some(dec!(500))));
    assert!(!goal_fits_salary(Some(dec!(400)), Some(dec!(500))));
    assert!(!goal_fits_salary(Some(dec!(3000)), None));
    assert!(!goal_fits_salary(None, Some(dec!(1))));
}
