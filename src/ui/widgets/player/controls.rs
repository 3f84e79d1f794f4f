use crate::app::state::feedback::Control;
use crate::app::App;
use crate::player::PlaybackMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let lit_style = Style::default().fg(theme.base).bg(theme.yellow).add_modifier(Modifier::BOLD);
    let style_for = |control: Control| {
        if app.feedback.is_lit(control) {
            lit_style
        } else {
            btn_style
        }
    };

    let play_icon = if app.status.transport.is_playing() { "⏸" } else { "▶" };

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(27),
            Constraint::Fill(1),
        ])
        .split(area);

    let center = Line::from(vec![
        Span::styled("  ⏮  ", style_for(Control::Previous)),
        Span::raw("   "),
        Span::styled(format!("  {}  ", play_icon), style_for(Control::PlayPause)),
        Span::raw("   "),
        Span::styled("  ⏭  ", style_for(Control::Next)),
    ]);
    f.render_widget(
        Paragraph::new(center).alignment(Alignment::Center).block(Block::default()),
        layout[1],
    );

    // Mode badges on the right
    let modes = app.status.modes();
    let badges: Vec<Span> = [
        (PlaybackMode::Random, "🔀"),
        (PlaybackMode::Repeat, "🔁"),
        (PlaybackMode::Single, "🔂"),
    ]
    .into_iter()
    .map(|(mode, icon)| {
        let style = if app.feedback.is_lit(Control::Mode(mode)) {
            lit_style
        } else if modes.get(mode) {
            Style::default().fg(theme.green)
        } else {
            Style::default().fg(theme.surface)
        };
        Span::styled(format!(" {}", icon), style)
    })
    .collect();
    f.render_widget(
        Paragraph::new(Line::from(badges)).alignment(Alignment::Left),
        layout[2],
    );
}
