use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    // Footer is always one line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    pub player: Rect,
    pub queue: Rect,
    pub library: Rect,
}

/// Player card on top, queue and library below. Wide terminals put the two
/// lists side by side, narrow ones stack them.
pub fn get_content_layout(area: Rect, wide_mode: bool) -> ContentLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let lists = Layout::default()
        .direction(if wide_mode {
            Direction::Horizontal
        } else {
            Direction::Vertical
        })
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    ContentLayout {
        player: rows[0],
        queue: lists[0],
        library: lists[1],
    }
}
