use crate::app::dispatcher::{Command, Dispatcher};
use crate::app::events::{issue, now, reload_catalog};
use crate::app::state::catalog::CatalogRow;
use crate::app::state::{App, Panel};
use crate::player::PlaybackMode;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

pub fn handle_input(app: &mut App, dispatcher: &Dispatcher, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app, dispatcher),
        Event::Mouse(mouse) => handle_mouse(mouse, app, dispatcher),
        _ => {}
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App, dispatcher: &Dispatcher) {
    let keys = app.keys.clone();

    if keys.matches(key, &keys.quit) {
        app.is_running = false;
        return;
    }

    // Transport
    if keys.matches(key, &keys.play_pause) {
        issue(app, dispatcher, Command::TogglePlayback);
        return;
    }
    if keys.matches(key, &keys.next_track) {
        issue(app, dispatcher, Command::Next);
        return;
    }
    if keys.matches(key, &keys.prev_track) {
        issue(app, dispatcher, Command::Previous);
        return;
    }

    // Seek ⏩ (commits on tick once keys stop)
    if keys.matches(key, &keys.seek_forward) || keys.matches(key, &keys.seek_backward) {
        let step = app.timings.seek_step();
        let delta = if keys.matches(key, &keys.seek_forward) {
            step
        } else {
            -step
        };
        let commit_delay = app.timings.keyboard_commit();
        app.seek.nudge(delta, now(), commit_delay);
        return;
    }

    // Modes
    for (binding, mode) in [
        (&keys.random, PlaybackMode::Random),
        (&keys.repeat, PlaybackMode::Repeat),
        (&keys.single, PlaybackMode::Single),
    ] {
        if keys.matches(key, binding) {
            issue(app, dispatcher, Command::ToggleMode(mode));
            return;
        }
    }

    if keys.matches(key, &keys.switch_panel) {
        app.panel = app.panel.toggle();
        return;
    }
    if keys.matches(key, &keys.clear_queue) {
        issue(app, dispatcher, Command::ClearQueue);
        return;
    }
    if keys.matches(key, &keys.reload_catalog) {
        reload_catalog(app, dispatcher);
        return;
    }

    let up = keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt);
    let down = keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt);

    match app.panel {
        Panel::Queue => {
            if up {
                app.queue.move_cursor(-1);
            } else if down {
                app.queue.move_cursor(1);
            } else if keys.matches(key, &keys.activate) {
                if let Some(position) = app.queue.selected().map(|e| e.position) {
                    issue(app, dispatcher, Command::PlayAt(position));
                }
            } else if keys.matches(key, &keys.delete_item) {
                if let Some(position) = app.queue.selected().map(|e| e.position) {
                    issue(app, dispatcher, Command::Delete(position));
                }
            }
        }
        Panel::Library => {
            if up {
                app.move_library_cursor(-1);
            } else if down {
                app.move_library_cursor(1);
            } else if keys.matches(key, &keys.activate) {
                activate_library_row(app, dispatcher);
            } else if keys.matches(key, &keys.add_to_queue) {
                enqueue_library_row(app, dispatcher);
            }
        }
    }
}

/// Enter on a library row: expand/collapse nodes, enqueue songs.
fn activate_library_row(app: &mut App, dispatcher: &Dispatcher) {
    let row = app.selected_row();
    let is_song = matches!(row, Some(CatalogRow::Song(_)));
    let key = row.and_then(|r| r.key().cloned());
    if is_song {
        enqueue_library_row(app, dispatcher);
    } else if let Some(key) = key {
        app.expansion.toggle(&key);
        app.clamp_library_cursor();
    }
}

fn enqueue_library_row(app: &mut App, dispatcher: &Dispatcher) {
    let uris = match app.selected_row() {
        Some(CatalogRow::Song(song)) => vec![song.uri.clone()],
        Some(row) => row
            .key()
            .map(|key| app.catalog.collect_urls(key))
            .unwrap_or_default(),
        None => Vec::new(),
    };
    if uris.is_empty() {
        return;
    }
    tracing::debug!(count = uris.len(), "enqueue");
    issue(app, dispatcher, Command::Enqueue(uris));
}

/// Press/drag/release on the progress bar is one seek gesture.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App, dispatcher: &Dispatcher) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(fraction) = app.progress_fraction_at(mouse.column, mouse.row) {
                app.mouse_seeking = true;
                app.seek.on_drag_input(fraction);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.mouse_seeking => {
            if let Some(fraction) = app.progress_fraction_clamped(mouse.column) {
                app.seek.on_drag_input(fraction);
            }
        }
        MouseEventKind::Up(MouseButton::Left) if app.mouse_seeking => {
            app.mouse_seeking = false;
            let fraction = app
                .progress_fraction_clamped(mouse.column)
                .or_else(|| app.seek.drag_preview())
                .unwrap_or(0.0);
            if let Some(request) = app.seek.on_drag_commit(fraction) {
                tracing::debug!(fraction = request.fraction, gesture = request.gesture, "seek");
                issue(
                    app,
                    dispatcher,
                    Command::Seek {
                        fraction: request.fraction,
                        gesture: request.gesture,
                    },
                );
            }
        }
        _ => {}
    }
}
