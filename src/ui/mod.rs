pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let main_layout = layout::get_main_layout(area);
    let content = layout::get_content_layout(main_layout.body_area, area.width >= 100);

    widgets::player::render(f, content.player, app);
    widgets::library::queue::render(f, content.queue, app);
    widgets::library::browser::render(f, content.library, app);

    render_footer(f, main_layout.footer_area, app);
}

fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let theme = &app.theme;
    let keys = &app.keys;
    let key_style = Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.overlay);

    let hints = [
        (&keys.play_pause, "play"),
        (&keys.seek_backward, "◀"),
        (&keys.seek_forward, "▶"),
        (&keys.switch_panel, "panel"),
        (&keys.add_to_queue, "add"),
        (&keys.delete_item, "del"),
        (&keys.reload_catalog, "reload"),
        (&keys.quit, "quit"),
    ];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", keys.display(key)), key_style),
                Span::styled(format!("{} ", label), label_style),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
