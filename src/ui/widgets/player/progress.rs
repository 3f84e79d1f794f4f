use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Filled,
    Knob,
    Empty,
    Ghost,
}

/// Cells of a `width`-column bar at `ratio`, with an optional drag ghost.
pub fn bar_cells(width: usize, ratio: f64, ghost: Option<f64>) -> Vec<Cell> {
    let occupied = (width as f64 * ratio.clamp(0.0, 1.0)) as usize;
    let ghost_idx = ghost.map(|g| {
        ((width.saturating_sub(1)) as f64 * g.clamp(0.0, 1.0)).round() as usize
    });

    (0..width)
        .map(|i| {
            if Some(i) == ghost_idx {
                Cell::Ghost
            } else if i + 1 == occupied {
                Cell::Knob
            } else if i < occupied {
                Cell::Filled
            } else {
                Cell::Empty
            }
        })
        .collect()
}

pub fn render_progress(f: &mut Frame, area: Rect, app: &mut App) {
    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];
    let gauge_area = Rect { height: 1, ..gauge_area };

    // Remember where the bar is for mouse hit tests
    app.progress_area = Some(gauge_area);

    let theme = &app.theme;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);
    let ghost_style = Style::default().fg(theme.yellow);

    let ratio = app.seek.bar_percent() / 100.0;
    let spans: Vec<Span> = bar_cells(gauge_area.width as usize, ratio, app.seek.drag_preview())
        .into_iter()
        .map(|cell| match cell {
            Cell::Filled => Span::styled("━", fill_style),
            Cell::Knob => Span::styled("●", fill_style),
            Cell::Empty => Span::styled("─", empty_style),
            Cell::Ghost => Span::styled("◆", ghost_style),
        })
        .collect();

    let gauge = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge, gauge_area);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let dragging = app.seek.drag_preview().is_some();
    let time_str = format!("{} / {}", app.seek.elapsed_label(), app.seek.total_label());
    let color = if dragging { theme.yellow } else { theme.overlay };
    let time_label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    f.render_widget(time_label, area);
}
