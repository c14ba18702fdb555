use chrono::{Datelike, NaiveDate};

/// Month length assumed by the daily spending limit and the elapsed-day count.
pub(crate) const ASSUMED_MONTH_DAYS: i64 = 30;

/// Days left in the month of `today`, counting today.
pub(crate) fn remaining_days_in_month(today: NaiveDate) -> i64 {
    i64::from(last_day_of_month(today)) - i64::from(today.day()) + 1
}

pub(crate) fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Days already spent this month under the fixed 30-day assumption, never below 1.
pub(crate) fn days_elapsed(remaining_days: i64) -> i64 {
    (ASSUMED_MONTH_DAYS - remaining_days).max(1)
}

pub(crate) fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%B").to_string()
}
