use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rust_decimal::Decimal;

use super::titled_block;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_totals(f, columns[0], app);
    render_rates(f, columns[1], app);
}

fn row(label: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<26}"), theme::normal_style()),
        Span::styled(value, style),
    ])
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let m = &app.metrics;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        row(
            "Salary",
            app.salary
                .map(format_amount)
                .unwrap_or_else(|| "not set".into()),
            bold,
        ),
        row(
            "Saving goal",
            app.saving_goal
                .map(format_amount)
                .unwrap_or_else(|| "not set".into()),
            bold,
        ),
        row(
            "Available for spending",
            format_amount(m.available_for_spending),
            if m.available_for_spending < Decimal::ZERO {
                theme::spent_style()
            } else {
                bold
            },
        ),
        Line::from(""),
        row("Total expenses", format_amount(m.total_expenses), theme::spent_style()),
        row(
            "  routine",
            format_amount(m.routine_expenses()),
            theme::normal_style(),
        ),
        row(
            "  emergency",
            format_amount(m.emergency_expenses),
            theme::emergency_style(),
        ),
        row(
            "Expenses recorded",
            format!("{} ({} emergency)", m.expense_count, m.emergency_count),
            theme::normal_style(),
        ),
        Line::from(""),
        row(
            "Remaining salary",
            format_amount(m.remaining_salary),
            theme::savings_style(),
        ),
    ];

    if app.goal_exceeds_salary {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Saving goal is larger than the salary",
            theme::warning_style(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(titled_block("Totals")), area);
}

fn render_rates(f: &mut Frame, area: Rect, app: &App) {
    let m = &app.metrics;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        row(
            "Days left this month",
            app.remaining_days.to_string(),
            bold,
        ),
        row("Daily average available", format_amount(m.daily_average), bold),
        row(
            "Daily spending limit",
            format_amount(m.daily_spending_limit),
            bold,
        ),
        row(
            "Adjusted daily limit",
            format_amount(m.adjusted_spending_limit),
            if m.needs_cutback() {
                theme::warning_style()
            } else {
                bold
            },
        ),
        row(
            "Actual daily spend",
            format_amount(m.actual_daily_spend),
            if m.is_over_daily_limit() {
                theme::spent_style()
            } else {
                theme::savings_style()
            },
        ),
    ];

    if m.is_over_daily_limit() {
        lines.push(row(
            "Over the daily limit by",
            format_amount(m.over_daily_limit),
            theme::spent_style(),
        ));
    }

    lines.push(Line::from(""));
    match &app.highest_spend_day {
        Some((date, total)) => lines.push(row(
            "Highest spending day",
            format!("{date}  {}", format_amount(*total)),
            theme::spent_style(),
        )),
        None => lines.push(Line::from(Span::styled(
            "  No spending recorded yet",
            theme::dim_style(),
        ))),
    }

    f.render_widget(Paragraph::new(lines).block(titled_block("Daily rates")), area);
}
