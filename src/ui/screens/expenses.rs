use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::titled_block;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),                           // Summary cards
            Constraint::Length(app.spending_panel_height()), // Spending information
            Constraint::Min(4),                              // Expense list
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    if app.shows_spending_panel() {
        render_spending_panel(f, chunks[1], app);
    }
    render_expense_list(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let note = app
        .saving_goal
        .map(|_| "after saving goal".to_string());

    render_card(
        f,
        cards[0],
        "Daily average available",
        format_amount(app.metrics.daily_average),
        theme::GREEN,
        note.clone(),
    );
    render_card(
        f,
        cards[1],
        "Remaining salary",
        format_amount(app.metrics.remaining_salary),
        theme::ACCENT,
        note,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    subtitle: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(titled_block(title));

    f.render_widget(text, area);
}

fn render_spending_panel(f: &mut Frame, area: Rect, app: &App) {
    let m = &app.metrics;
    let over = m.is_over_daily_limit();
    let bar_color = if over { theme::RED } else { theme::GREEN };

    let mut limit_line = vec![
        Span::styled("Daily spending limit  ", theme::normal_style()),
        Span::styled(
            format_amount(m.daily_spending_limit),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if over {
        limit_line.push(Span::styled(
            format!("   over the limit by {}", format_amount(m.over_daily_limit)),
            theme::spent_style(),
        ));
    }

    let bar_width = (area.width as usize).saturating_sub(12).min(40);
    let mut lines = vec![
        Line::from(limit_line),
        Line::from(Span::styled(
            format!(
                "to reach a saving goal of {}",
                app.saving_goal.map(format_amount).unwrap_or_default()
            ),
            theme::dim_style(),
        )),
        Line::from(vec![
            Span::styled(
                progress_bar(m.daily_limit_usage, bar_width),
                Style::default().fg(bar_color),
            ),
            Span::styled(
                format!(" {}/day", format_amount(m.actual_daily_spend)),
                theme::dim_style(),
            ),
        ]),
    ];

    if app.has_emergency() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Adjusted limit after emergency expenses",
            theme::emergency_style(),
        )));
        let hint = if m.needs_cutback() {
            Span::styled("   cut back over the remaining days", theme::warning_style())
        } else {
            Span::styled("   saving goal still reachable", theme::savings_style())
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} / day", format_amount(m.adjusted_spending_limit)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            hint,
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "spread over the {} remaining days to absorb emergency costs",
                app.remaining_days
            ),
            theme::dim_style(),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(titled_block("Spending")),
        area,
    );
}

fn render_expense_list(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Expenses ({})", app.expenses.len());

    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <title> <amount> or press a",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(titled_block(title)),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Title", "", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let tag = if expense.is_emergency {
                Cell::from(Span::styled("emergency", theme::emergency_style()))
            } else {
                Cell::from("")
            };

            Row::new(vec![
                Cell::from(format!("  {}", expense.date)),
                Cell::from(truncate(&expense.title, 40)),
                tag,
                Cell::from(Span::styled(
                    format_amount(expense.amount),
                    theme::spent_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(11),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(title));
    f.render_widget(table, area);
}
