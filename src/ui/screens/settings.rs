use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::titled_block;
use crate::ui::app::{App, InputMode, SettingField};
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Fields
            Constraint::Min(5),    // Data + about
        ])
        .split(area);

    render_fields(f, chunks[0], app);
    render_about(f, chunks[1], app);
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = SettingField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let editing = app.input_mode == InputMode::Editing && app.editing_field == Some(*field);
            let value = if editing {
                format!("{}_", app.command_input)
            } else {
                app.setting_value(*field)
                    .map(format_amount)
                    .unwrap_or_else(|| "not set".into())
            };
            let style = if i == app.setting_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {:<22}", field.to_string()), style),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();

    if app.goal_exceeds_salary {
        items.push(ListItem::new(""));
        items.push(ListItem::new(Span::styled(
            "  Saving goal is larger than the salary",
            theme::warning_style(),
        )));
    }

    f.render_widget(List::new(items).block(titled_block("Settings")), area);
}

fn render_about(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  :reset", Style::default().fg(theme::RED)),
            Span::styled(
                "  delete every expense, savings record and setting",
                theme::dim_style(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  DayBudget {}  ·  data stays on this machine  ·  today is {}",
                env!("CARGO_PKG_VERSION"),
                app.today.format("%Y-%m-%d")
            ),
            theme::dim_style(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(titled_block("Data")), area);
}
