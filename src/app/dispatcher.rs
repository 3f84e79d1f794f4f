//! Gesture → remote command → refresh trigger.
//!
//! Every call here returns immediately. The blocking facade call runs on
//! `spawn_blocking` and its outcome comes back to the event loop as an
//! [`AppEvent`]. Nothing is retried.

use super::events::{AppEvent, RefreshTrigger};
use super::poller::poll_once;
use super::state::feedback::Control;
use crate::app::config::Timings;
use crate::error::ServiceError;
use crate::player::{PlaybackMode, PlaybackService, ServiceResult};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One remote command per user gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePlayback,
    Next,
    Previous,
    ToggleMode(PlaybackMode),
    Enqueue(Vec<String>),
    Delete(u32),
    ClearQueue,
    PlayAt(u32),
    Seek { fraction: f64, gesture: u64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::TogglePlayback => "toggle playback",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::ToggleMode(_) => "toggle mode",
            Command::Enqueue(_) => "enqueue",
            Command::Delete(_) => "delete",
            Command::ClearQueue => "clear queue",
            Command::PlayAt(_) => "play at",
            Command::Seek { .. } => "set position",
        }
    }

    /// Refreshes raised once the command completes, whatever the outcome.
    pub fn triggers(&self) -> &'static [RefreshTrigger] {
        match self {
            Command::Enqueue(_) | Command::Delete(_) | Command::ClearQueue => {
                &[RefreshTrigger::QueueChanged]
            }
            Command::Next | Command::Previous => &[RefreshTrigger::SongChanged],
            Command::TogglePlayback => {
                &[RefreshTrigger::SongChanged, RefreshTrigger::StatusChanged]
            }
            Command::ToggleMode(_) => &[RefreshTrigger::StatusChanged],
            // The poller notices the new song / position on its own
            Command::PlayAt(_) | Command::Seek { .. } => &[],
        }
    }

    /// Control that flashes while the command is in flight.
    pub fn control(&self) -> Option<Control> {
        match self {
            Command::TogglePlayback => Some(Control::PlayPause),
            Command::Next => Some(Control::Next),
            Command::Previous => Some(Control::Previous),
            Command::ToggleMode(mode) => Some(Control::Mode(*mode)),
            Command::Enqueue(_) => Some(Control::Enqueue),
            Command::Delete(_) => Some(Control::Delete),
            Command::ClearQueue => Some(Control::Clear),
            Command::PlayAt(_) | Command::Seek { .. } => None,
        }
    }

    fn run(&self, service: &dyn PlaybackService) -> ServiceResult<()> {
        match self {
            Command::TogglePlayback => service.toggle_playback().map(|_| ()),
            Command::Next => service.next(),
            Command::Previous => service.previous(),
            Command::ToggleMode(mode) => service.toggle_mode(*mode),
            Command::Enqueue(uris) => service.enqueue(uris),
            Command::Delete(position) => service.delete_at(*position),
            Command::ClearQueue => service.clear_queue(),
            Command::PlayAt(position) => service.play_at(*position),
            Command::Seek { fraction, .. } => service.set_position(*fraction),
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn PlaybackService>,
    tx: mpsc::Sender<AppEvent>,
    timings: Timings,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn PlaybackService>, tx: mpsc::Sender<AppEvent>, timings: Timings) -> Self {
        Self {
            service,
            tx,
            timings,
        }
    }

    /// Run `job` off the loop and deliver its result as an event.
    fn spawn<T, J, E>(&self, job: J, into_event: E)
    where
        T: Send + 'static,
        J: FnOnce(&dyn PlaybackService) -> T + Send + 'static,
        E: FnOnce(ServiceResult<T>) -> AppEvent + Send + 'static,
    {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || job(service.as_ref()))
                .await
                .map_err(ServiceError::from);
            let _ = tx.send(into_event(result)).await;
        });
    }

    /// Fire one command. Exactly one facade call per invocation.
    pub fn dispatch(&self, command: Command) {
        tracing::debug!(command = command.name(), "dispatch");
        let job_command = command.clone();
        self.spawn(
            move |service| job_command.run(service),
            move |result| AppEvent::CommandFinished {
                command,
                result: result.and_then(|inner| inner),
            },
        );
    }

    pub fn schedule_settle(&self, gesture: u64) {
        let tx = self.tx.clone();
        let delay = self.timings.settle_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::SeekSettled { gesture }).await;
        });
    }

    pub fn refresh_queue(&self) {
        self.spawn(
            |service| service.queue(),
            |result| AppEvent::QueueLoaded(result.and_then(|inner| inner)),
        );
    }

    pub fn refresh_album_art(&self) {
        self.spawn(
            |service| service.album_art(),
            |result| AppEvent::AlbumArt(result.and_then(|inner| inner)),
        );
    }

    pub fn poll_now(&self) {
        self.spawn(poll_once, |result| match result.and_then(|inner| inner) {
            Ok(snapshot) => AppEvent::Poll(snapshot),
            Err(e) => AppEvent::PollFailed(e.to_string()),
        });
    }

    /// Cached catalog first, a rebuild when the cache is absent or unusable.
    pub fn load_catalog(&self) {
        self.spawn(
            |service| match service.load_catalog() {
                Ok(Some(snapshot)) => Ok(Some(snapshot)),
                Ok(None) => service.rebuild_catalog(),
                Err(e) => {
                    tracing::warn!(error = %e, "catalog cache unusable, rebuilding");
                    service.rebuild_catalog()
                }
            },
            |result| AppEvent::CatalogLoaded(result.and_then(|inner| inner)),
        );
    }

    pub fn reload_catalog(&self) {
        self.spawn(
            |service| service.rebuild_catalog(),
            |result| AppEvent::CatalogLoaded(result.and_then(|inner| inner)),
        );
    }

    pub fn apply_trigger(&self, trigger: RefreshTrigger) {
        match trigger {
            RefreshTrigger::QueueChanged => self.refresh_queue(),
            RefreshTrigger::SongChanged => {
                self.refresh_queue();
                self.refresh_album_art();
            }
            RefreshTrigger::StatusChanged => self.poll_now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_follow_command_kind() {
        assert_eq!(
            Command::Enqueue(vec!["a".into()]).triggers(),
            &[RefreshTrigger::QueueChanged]
        );
        assert_eq!(Command::Delete(3).triggers(), &[RefreshTrigger::QueueChanged]);
        assert_eq!(Command::Next.triggers(), &[RefreshTrigger::SongChanged]);
        assert_eq!(
            Command::ToggleMode(PlaybackMode::Single).triggers(),
            &[RefreshTrigger::StatusChanged]
        );
        assert!(Command::PlayAt(1).triggers().is_empty());
        assert!(Command::Seek { fraction: 0.5, gesture: 1 }.triggers().is_empty());
    }

    #[test]
    fn seek_and_play_at_do_not_flash() {
        assert_eq!(Command::PlayAt(0).control(), None);
        assert_eq!(
            Command::ToggleMode(PlaybackMode::Repeat).control(),
            Some(Control::Mode(PlaybackMode::Repeat))
        );
    }
}
