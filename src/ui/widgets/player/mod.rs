use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    // --- MUSIC CARD ---
    let mut title = vec![Span::styled(
        " Now Playing ",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )];
    if app.connection_error.is_some() {
        title.push(Span::styled(" ⚠ offline ", Style::default().fg(theme.red)));
    }

    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(title))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = music_block.inner(area);
    f.render_widget(music_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Info
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    info::render(f, chunks[0], app);
    if chunks[1].height > 0 {
        progress::render_progress(f, chunks[1], app);
    } else {
        app.progress_area = None;
    }
    if chunks[2].height > 0 {
        progress::render_time(f, chunks[2], app);
    }
    if chunks[3].height > 0 {
        controls::render(f, chunks[3], app);
    }
}
