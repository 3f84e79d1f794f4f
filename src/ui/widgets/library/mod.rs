use crate::app::state::Panel;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

pub mod browser;
pub mod queue;

/// Rounded panel frame; the focused panel gets the accent colour.
pub fn panel_block<'a>(theme: &Theme, title: String, panel: Panel, focused: Panel) -> Block<'a> {
    let accent = if panel == focused {
        theme.blue
    } else {
        theme.surface
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Color::Reset))
}
