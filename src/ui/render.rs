use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area(), app);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Expenses => super::screens::expenses::render(f, area, app),
        Screen::Reports => super::screens::reports::render(f, area, app),
        Screen::Savings => super::screens::savings::render(f, area, app),
        Screen::Settings => super::screens::settings::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(
        " {} | {} days left | {} expenses",
        app.screen, app.remaining_days, app.metrics.expense_count
    );

    let right = match app.screen {
        Screen::Expenses => " a add | e emergency | D delete | ? help ",
        Screen::Reports => " :days recount | ? help ",
        Screen::Savings => " R rollover | ? help ",
        Screen::Settings => " Enter edit | :reset | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let edit_prompt = match app.editing_field {
        Some(field) => format!("{field}> "),
        None => "edit> ".to_string(),
    };
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Editing => (
            Line::from(vec![
                Span::styled(edit_prompt.as_str(), Style::default().fg(theme::GREEN)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some((edit_prompt.len() + app.command_input.len()) as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("1-4", "switch screen"),
    ("Tab/S-Tab", "next/previous screen"),
    ("j/k", "move selection"),
    ("g/G", "first/last row"),
    ("Ctrl-d/u", "half page down/up"),
    (":", "command line"),
    ("Esc", "clear status"),
    ("Ctrl-q", "quit"),
];

fn screen_keys(screen: Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Expenses => &[
            ("a", "add expense"),
            ("e", "add emergency expense"),
            ("D", "delete selected"),
        ],
        Screen::Reports => &[],
        Screen::Savings => &[("R", "roll over the month")],
        Screen::Settings => &[("Enter", "edit selected value")],
    }
}

fn help_heading(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Lays key bindings out two per row.
fn key_rows(keys: &[(&str, &str)]) -> Vec<Line<'static>> {
    keys.chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for (key, what) in pair {
                spans.push(Span::styled(format!("  {key:<10}"), theme::title_style()));
                spans.push(Span::styled(format!("{what:<24}"), theme::normal_style()));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_help_overlay(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![help_heading(" Keys".into())];
    lines.extend(key_rows(GLOBAL_KEYS));

    let local = screen_keys(app.screen);
    if !local.is_empty() {
        lines.push(Line::from(""));
        lines.push(help_heading(format!(" On {}", app.screen)));
        lines.extend(key_rows(local));
    }

    lines.push(Line::from(""));
    lines.push(help_heading(" Commands".into()));
    for (names, description) in commands::help_entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {names:<18}"), theme::title_style()),
            Span::styled(description, theme::normal_style()),
        ]));
    }

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let width = 76.min(area.width.saturating_sub(4));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(Span::styled(" DayBudget help ", theme::title_style()))
                .title_bottom(Span::styled(" any key closes ", theme::dim_style()))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
