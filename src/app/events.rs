use super::dispatcher::{Command, Dispatcher};
use super::poller::PollSnapshot;
use super::state::catalog::CatalogTree;
use super::state::App;
use crate::error::ViewError;
use crate::player::{CatalogSnapshot, QueueEntry, ServiceResult};
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Instant;

/// Named refreshes raised after a mutating command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    QueueChanged,
    SongChanged,
    StatusChanged,
}

pub enum AppEvent {
    Input(Event),
    Poll(PollSnapshot),
    PollFailed(String),
    CommandFinished {
        command: Command,
        result: ServiceResult<()>,
    },
    SeekSettled {
        gesture: u64,
    },
    QueueLoaded(ServiceResult<Vec<QueueEntry>>),
    AlbumArt(ServiceResult<Option<PathBuf>>),
    CatalogLoaded(ServiceResult<Option<CatalogSnapshot>>),
    Tick,
}

/// Loop clock. Follows tokio's clock so paused-time tests drive it too.
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Flash the command's control and dispatch it once.
pub fn issue(app: &mut App, dispatcher: &Dispatcher, command: Command) {
    if let Some(control) = command.control() {
        app.feedback
            .flash(control, now(), app.timings.feedback_clear());
    }
    dispatcher.dispatch(command);
}

pub fn reload_catalog(app: &mut App, dispatcher: &Dispatcher) {
    app.catalog_loading = true;
    app.feedback.flash(
        super::state::feedback::Control::Reload,
        now(),
        app.timings.feedback_clear(),
    );
    dispatcher.reload_catalog();
}

/// Apply one non-input event to the session.
pub fn apply_event(app: &mut App, dispatcher: &Dispatcher, event: AppEvent) {
    match event {
        AppEvent::Input(event) => super::input_handler::handle_input(app, dispatcher, event),

        AppEvent::Poll(snapshot) => {
            if let Some(trigger) = app.apply_poll(snapshot) {
                dispatcher.apply_trigger(trigger);
            }
        }

        AppEvent::PollFailed(error) => {
            tracing::warn!(%error, "status poll failed, keeping last view");
            app.connection_error = Some(error);
        }

        AppEvent::CommandFinished { command, result } => {
            let name = command.name();
            match result {
                Ok(()) => tracing::debug!(command = name, "command finished"),
                Err(source) => ViewError::CommandFailure {
                    command: name,
                    source,
                }
                .log(),
            }

            if let Command::Seek { gesture, .. } = &command {
                if app.seek.on_seek_finished(*gesture) {
                    dispatcher.schedule_settle(*gesture);
                }
            }
            for trigger in command.triggers() {
                dispatcher.apply_trigger(*trigger);
            }
        }

        AppEvent::SeekSettled { gesture } => {
            if app.seek.on_settled(gesture) {
                tracing::debug!(gesture, "seek settled");
            }
        }

        AppEvent::QueueLoaded(Ok(entries)) => {
            app.queue.replace(entries);
            if app.queue.lacks_active(app.status.transport.is_playing()) {
                let error = ViewError::MalformedState(format!(
                    "playing, but none of {} queue entries is active",
                    app.queue.len()
                ));
                tracing::debug!(%error, "queue refreshed");
            }
        }
        AppEvent::QueueLoaded(Err(e)) => {
            tracing::warn!(error = %e, "queue refresh failed");
        }

        AppEvent::AlbumArt(Ok(art)) => app.now_playing.album_art = art,
        AppEvent::AlbumArt(Err(e)) => {
            tracing::debug!(error = %e, "album art lookup failed");
            app.now_playing.album_art = None;
        }

        AppEvent::CatalogLoaded(result) => {
            let outcome = match result {
                Ok(Some(snapshot)) => Ok(snapshot),
                Ok(None) => Err(ViewError::LoadFailure(None)),
                Err(e) => Err(ViewError::LoadFailure(Some(e))),
            };
            match outcome {
                Ok(snapshot) => {
                    tracing::info!(
                        artists = snapshot.artists.len(),
                        songs = snapshot.song_count(),
                        "catalog loaded"
                    );
                    app.install_catalog(CatalogTree::from_snapshot(snapshot));
                }
                Err(e) => {
                    // Stale (or empty) tree stays on screen
                    e.log();
                    app.catalog_loading = false;
                }
            }
        }

        AppEvent::Tick => {
            let now = now();
            app.feedback.clear_expired(now);
            if let Some(request) = app.seek.poll_keyboard_commit(now) {
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
    }
}
