use crate::player::{CurrentSong, ModeFlags, Position, TransportState};
use std::path::PathBuf;

/// Mirrored transport + mode state ⏯️
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackStatus {
    pub transport: TransportState,
    pub elapsed_seconds: f64,
    pub total_seconds: f64,
    pub random: bool,
    pub repeat: bool,
    pub single: bool,
}

impl PlaybackStatus {
    pub fn apply(&mut self, transport: TransportState, modes: ModeFlags, position: Position) {
        self.transport = transport;
        self.random = modes.random;
        self.repeat = modes.repeat;
        self.single = modes.single;
        self.elapsed_seconds = position.elapsed;
        self.total_seconds = position.total;
    }

    pub fn modes(&self) -> ModeFlags {
        ModeFlags {
            random: self.random,
            repeat: self.repeat,
            single: self.single,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NowPlaying {
    pub song: Option<CurrentSong>,
    pub album_art: Option<PathBuf>,
}

impl NowPlaying {
    /// Replace the song; returns true when it is a different song.
    pub fn update_song(&mut self, song: Option<CurrentSong>) -> bool {
        let changed = self.song.as_ref().map(|s| &s.uri) != song.as_ref().map(|s| &s.uri);
        if changed {
            self.album_art = None;
        }
        self.song = song;
        changed
    }
}

/// `m:ss`. Zero, negative and non-finite inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Progress bar value in percent; 0 when nothing is loaded.
pub fn progress_percent(elapsed: f64, total: f64) -> f64 {
    if !total.is_finite() || total <= 0.0 || !elapsed.is_finite() {
        return 0.0;
    }
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}
