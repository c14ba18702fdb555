use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::titled_block;
use crate::models::SavingsRecord;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    render_total(f, chunks[0], app);
    render_history(f, chunks[1], app);
}

fn render_total(f: &mut Frame, area: Rect, app: &App) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(app.saved_amount),
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} left this month. Press R or :rollover to save it",
                format_amount(app.metrics.remaining_salary)
            ),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block("Total saved"));
    f.render_widget(text, area);
}

/// `✓ goal achieved`, `60% of goal`, or nothing when the month had no goal.
pub(crate) fn goal_status(record: &SavingsRecord) -> Option<String> {
    record.goal?;
    if record.goal_achieved {
        return Some("✓ goal achieved".into());
    }
    record
        .goal_progress()
        .map(|p| format!("{} of goal", format_percent(p)))
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Monthly savings ({})", app.monthly_savings.len());

    if app.monthly_savings.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No months rolled over yet",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(titled_block(title));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .monthly_savings
        .iter()
        .enumerate()
        .skip(app.savings_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, record)| {
            let style = if i == app.savings_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let status = goal_status(record).unwrap_or_default();
            let status_style = if record.goal_achieved {
                theme::savings_style()
            } else {
                theme::emergency_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("  {:<12}", record.month), style),
                Span::styled(format!("{:<12}", record.date), style),
                Span::styled(
                    format!("{:>14}  ", format_amount(record.amount)),
                    theme::savings_style(),
                ),
                Span::styled(status, status_style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(titled_block(title)), area);
}
