use super::panel_block;
use crate::app::state::feedback::Control;
use crate::app::state::playback::format_time;
use crate::app::state::Panel;
use crate::app::App;
use crate::ui::utils::{truncate, viewport_start};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    // Scroll the active entry into view once per refresh
    if let Some(active) = app.queue.take_scroll_request() {
        tracing::trace!(active, "queue scrolled to active entry");
    }

    let theme = &app.theme;
    let lit = app.feedback.is_lit(Control::Delete) || app.feedback.is_lit(Control::Clear);
    let title = format!(" Queue · {} songs {}", app.queue.len(), if lit { "⟳ " } else { "" });
    let block = panel_block(theme, title, Panel::Queue, app.panel);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    let time_w = 6;
    let artist_w = width / 4;
    let title_w = width.saturating_sub(artist_w + time_w + 8);

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;

    let mut lines: Vec<Line> = Vec::new();
    if app.queue.is_empty() {
        lines.push(
            Line::from(Span::styled("Empty queue", Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
        lines.push(
            Line::from(Span::styled(
                "Browse the library to add songs",
                Style::default().fg(grid),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        let selected = app.queue.cursor;
        let focused = app.panel == Panel::Queue;
        let start_idx = viewport_start(selected, app.queue.len(), height);

        for (idx, item) in app
            .queue
            .entries()
            .iter()
            .enumerate()
            .skip(start_idx)
            .take(height)
        {
            let is_sel = focused && idx == selected;

            // ● selected, ◉ playing, ○ normal
            let (marker, m_color, t_style, a_style) = if is_sel {
                (
                    "●",
                    cream,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.text),
                )
            } else if item.is_active {
                ("◉", pink, Style::default().fg(pink), Style::default().fg(pink))
            } else {
                (
                    "○",
                    grid,
                    Style::default().fg(theme.text),
                    Style::default().fg(muted),
                )
            };

            let title = truncate(&item.title, title_w);
            let artist = truncate(&item.artist, artist_w.saturating_sub(1));
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(m_color)),
                Span::styled(
                    format!("{:>3} ", item.position + 1),
                    Style::default().fg(if is_sel { green } else { muted }),
                ),
                Span::styled(format!("{:title_w$} ", title, title_w = title_w), t_style),
                Span::styled(format!("{:artist_w$}", artist, artist_w = artist_w), a_style),
                Span::styled(
                    format!("{:>time_w$}", format_time(item.duration_seconds as f64), time_w = time_w),
                    Style::default().fg(muted),
                ),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
