pub(crate) mod expenses;
pub(crate) mod reports;
pub(crate) mod savings;
pub(crate) mod settings;

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme;

/// Bordered block with the dim bold title every panel uses.
pub(crate) fn titled_block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}
