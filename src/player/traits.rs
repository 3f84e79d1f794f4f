use crate::error::ServiceError;
use crate::player::wire::CatalogSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransportState {
    Playing,
    #[default]
    Paused,
}

impl TransportState {
    pub fn is_playing(self) -> bool {
        self == TransportState::Playing
    }
}

/// The song MPD reports as current.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentSong {
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeFlags {
    pub random: bool,
    pub repeat: bool,
    pub single: bool,
}

impl ModeFlags {
    pub fn get(&self, mode: PlaybackMode) -> bool {
        match mode {
            PlaybackMode::Random => self.random,
            PlaybackMode::Repeat => self.repeat,
            PlaybackMode::Single => self.single,
        }
    }
}

/// Boolean playback modes that can be toggled remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackMode {
    Random,
    Repeat,
    Single,
}

impl PlaybackMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackMode::Random => "random",
            PlaybackMode::Repeat => "repeat",
            PlaybackMode::Single => "single",
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Play position in seconds. `total == 0.0` means no track is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub elapsed: f64,
    pub total: f64,
}

/// Everything one status poll reports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PollSnapshot {
    pub song: Option<CurrentSong>,
    pub transport: TransportState,
    pub modes: ModeFlags,
    pub position: Position,
    /// Bumped by the server on every queue edit, from any client.
    pub queue_version: u32,
}

/// One row of the remote play queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub position: u32,
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub duration_seconds: u64,
    pub is_active: bool,
}

/// The remote playback service, seen through the narrow interface the view
/// needs.
///
/// Methods block; callers run them through `tokio::task::spawn_blocking` so
/// the event loop is never suspended by the network.
pub trait PlaybackService: Send + Sync {
    fn current_song(&self) -> ServiceResult<Option<CurrentSong>>;

    /// Reference to cover art for the current song, if any exists.
    fn album_art(&self) -> ServiceResult<Option<PathBuf>>;

    fn status(&self) -> ServiceResult<ModeFlags>;
    fn playback_state(&self) -> ServiceResult<TransportState>;
    fn position(&self) -> ServiceResult<Position>;
    fn queue_version(&self) -> ServiceResult<u32>;

    /// Song, status and queue version in one go. Backends that can answer
    /// from a single status read should override this.
    fn snapshot(&self) -> ServiceResult<PollSnapshot> {
        Ok(PollSnapshot {
            song: self.current_song()?,
            transport: self.playback_state()?,
            modes: self.status()?,
            position: self.position()?,
            queue_version: self.queue_version()?,
        })
    }

    /// Seek within the current song; `fraction` is in `[0, 1]`.
    fn set_position(&self, fraction: f64) -> ServiceResult<()>;

    /// Returns the new transport state.
    fn toggle_playback(&self) -> ServiceResult<TransportState>;
    fn next(&self) -> ServiceResult<()>;
    fn previous(&self) -> ServiceResult<()>;
    fn toggle_mode(&self, mode: PlaybackMode) -> ServiceResult<()>;

    fn queue(&self) -> ServiceResult<Vec<QueueEntry>>;
    fn play_at(&self, position: u32) -> ServiceResult<()>;
    fn delete_at(&self, position: u32) -> ServiceResult<()>;
    fn clear_queue(&self) -> ServiceResult<()>;
    fn enqueue(&self, uris: &[String]) -> ServiceResult<()>;

    /// Previously built catalog, or `None` when there is none yet.
    fn load_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>>;

    /// Rebuild the catalog from the service's database.
    fn rebuild_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>>;
}
