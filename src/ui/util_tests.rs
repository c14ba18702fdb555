#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Japanese characters are multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_emoji() {
    assert_eq!(truncate("🎉🎊🎈🎁", 3), "🎉🎊…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

#[test]
fn test_truncate_mixed_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

#[test]
fn test_truncate_two_chars() {
    assert_eq!(truncate("hello", 2), "h…");
}

#[test]
fn test_truncate_single_char_string() {
    assert_eq!(truncate("a", 1), "a");
    assert_eq!(truncate("a", 5), "a");
}

#[test]
fn test_truncate_max_one_with_long_string() {
    // max=1 should always produce "…" for strings longer than 1
    assert_eq!(truncate("ab", 1), "…");
    assert_eq!(truncate("abc", 1), "…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "1,234.56");
}

#[test]
fn test_format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99)), "999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "1,234,567.89");
}

#[test]
fn test_format_amount_pads_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "1.50");
    assert_eq!(format_amount(dec!(115)), "115.00");
}

#[test]
fn test_format_amount_daily_average() {
    // 2500 / 30 spread over a month
    assert_eq!(format_amount(dec!(83.33)), "83.33");
}

// ── format_percent ─────────────────────────────────────────

#[test]
fn test_format_percent_whole() {
    assert_eq!(format_percent(dec!(60)), "60%");
}

#[test]
fn test_format_percent_rounds() {
    assert_eq!(format_percent(dec!(66.666)), "67%");
    assert_eq!(format_percent(dec!(33.333)), "33%");
}

#[test]
fn test_format_percent_half_rounds_up() {
    assert_eq!(format_percent(dec!(12.5)), "13%");
}

// ── progress_bar ───────────────────────────────────────────

#[test]
fn test_progress_bar_empty() {
    assert_eq!(progress_bar(dec!(0), 4), "[░░░░]");
}

#[test]
fn test_progress_bar_half() {
    assert_eq!(progress_bar(dec!(0.5), 4), "[██░░]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(dec!(1.7), 4), "[████]");
    assert_eq!(progress_bar(dec!(-1), 4), "[░░░░]");
}

// ── scrolling ──────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

#[test]
fn test_clamp_index_after_delete() {
    let (mut index, mut scroll) = (5, 5);
    clamp_index(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_clamp_index_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    clamp_index(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}
