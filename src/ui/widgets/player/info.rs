use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let max_width = area.width.saturating_sub(4) as usize;

    let lines = match &app.now_playing.song {
        Some(song) => {
            let mut subtitle = song.artist.clone();
            if !song.album.is_empty() {
                subtitle = format!("{} · {}", subtitle, song.album);
            }
            if app.now_playing.album_art.is_some() {
                subtitle.push_str(" 🖼");
            }
            vec![
                Line::from(Span::styled(
                    format!("🎵 {}", truncate(&song.title, max_width.saturating_sub(2))),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate(&subtitle, max_width),
                    Style::default().fg(theme.magenta),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Nothing playing",
            Style::default().fg(theme.overlay).add_modifier(Modifier::DIM),
        ))],
    };

    let info = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
