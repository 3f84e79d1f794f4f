use super::panel_block;
use crate::app::state::catalog::CatalogRow;
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

/// Artist → Album → Song tree 📚
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let busy = app.catalog_loading || app.feedback.is_lit(Control::Reload);
    let title = format!(
        " Library · {} artists {}",
        app.catalog.artists().len(),
        if busy { "⟳ " } else { "" }
    );
    let block = panel_block(theme, title, Panel::Library, app.panel);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    let muted = theme.overlay;

    let rows = app.library_rows();
    let mut lines: Vec<Line> = Vec::new();

    if rows.is_empty() {
        let message = if app.catalog_loading {
            "Loading library…"
        } else {
            "Library is empty"
        };
        lines.push(
            Line::from(Span::styled(message, Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
    } else {
        let selected = app.library_selected;
        let focused = app.panel == Panel::Library;
        let start_idx = viewport_start(selected, rows.len(), height);

        for (idx, row) in rows.iter().enumerate().skip(start_idx).take(height) {
            let is_sel = focused && idx == selected;
            let indent = "  ".repeat(row.depth());
            let expanded = row.key().map(|k| app.expansion.is_expanded(k));
            let arrow = match expanded {
                Some(true) => "▾ ",
                Some(false) => "▸ ",
                None => "♪ ",
            };

            let (label, trailing, color) = match row {
                CatalogRow::Artist(artist) => (artist.name.clone(), String::new(), theme.magenta),
                CatalogRow::Album(album) => (
                    album.name.clone(),
                    album.year.map(|y| format!("{}", y)).unwrap_or_default(),
                    theme.cyan,
                ),
                CatalogRow::Song(song) => (
                    song.title.clone(),
                    format_time(song.duration_seconds as f64),
                    theme.text,
                ),
            };

            let label_w = width.saturating_sub(indent.len() + arrow.chars().count() + 8);
            let mut style = Style::default().fg(color);
            if is_sel {
                style = style.bg(theme.surface).add_modifier(Modifier::BOLD);
            }

            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(arrow, Style::default().fg(muted)),
                Span::styled(
                    format!("{:label_w$}", truncate(&label, label_w), label_w = label_w),
                    style,
                ),
                Span::styled(format!("{:>7}", trailing), Style::default().fg(muted)),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
