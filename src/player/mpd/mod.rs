pub mod catalog;

use super::catalog_cache;
use super::traits::{
    CurrentSong, ModeFlags, PlaybackMode, PlaybackService, PollSnapshot, Position, QueueEntry,
    ServiceResult, TransportState,
};
use super::wire::{find_tag, whole_seconds, CatalogSnapshot};
use crate::error::ServiceError;
use catalog::{collect_tracks, group_tracks};
use mpd::{Client, Song, State, Status};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const COVER_NAMES: [&str; 3] = ["cover", "folder", "front"];
const COVER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// MPD-backed playback service
pub struct MpdService {
    host: String,
    port: u16,
    music_directory: PathBuf,
    catalog_cache: PathBuf,
    client: Mutex<Option<Client>>,
}

impl MpdService {
    pub fn new(host: &str, port: u16, music_directory: PathBuf, catalog_cache: PathBuf) -> Self {
        Self {
            host: host.to_string(),
            port,
            music_directory,
            catalog_cache,
            client: Mutex::new(None),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run `f` against the MPD client, reconnecting if necessary.
    fn with_client<F, T>(&self, f: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut Client) -> ServiceResult<T>,
    {
        let mut client_guard = self.client.lock().map_err(|_| ServiceError::Poisoned)?;

        if client_guard.is_none() {
            let addr = self.addr();
            match Client::connect(&addr) {
                Ok(c) => {
                    tracing::info!(%addr, "connected to MPD");
                    *client_guard = Some(c);
                }
                Err(source) => {
                    *client_guard = None;
                    return Err(ServiceError::Connect { addr, source });
                }
            }
        }

        let result = match client_guard.as_mut() {
            Some(client) => f(client),
            None => Err(ServiceError::Rejected("no MPD connection".to_string())),
        };
        // A failed exchange may leave the stream mid-response; start over next call
        if let Err(ServiceError::Command { command, .. }) = &result {
            tracing::debug!(command = *command, "dropping MPD connection");
            *client_guard = None;
        }
        result
    }

    fn current_song_file(&self) -> ServiceResult<Option<String>> {
        self.with_client(|client| {
            let song = client
                .currentsong()
                .map_err(ServiceError::command("currentsong"))?;
            Ok(song.map(|s| s.file))
        })
    }
}

fn current_song_from(song: Song) -> CurrentSong {
    let title = song
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| song.file.clone());
    let artist = song
        .artist
        .clone()
        .filter(|a| !a.trim().is_empty())
        .or_else(|| find_tag(&song.tags, "Artist").map(str::to_string))
        .or_else(|| find_tag(&song.tags, "AlbumArtist").map(str::to_string))
        .unwrap_or_else(|| "Unknown Artist".to_string());
    let album = find_tag(&song.tags, "Album").unwrap_or_default().to_string();

    CurrentSong {
        uri: song.file,
        title,
        artist,
        album,
    }
}

fn transport_of(status: &Status) -> TransportState {
    match status.state {
        State::Play => TransportState::Playing,
        State::Pause | State::Stop => TransportState::Paused,
    }
}

fn modes_of(status: &Status) -> ModeFlags {
    ModeFlags {
        random: status.random,
        repeat: status.repeat,
        single: status.single,
    }
}

fn position_of(status: &Status) -> Position {
    Position {
        elapsed: status.elapsed.map(|d| d.as_secs_f64()).unwrap_or(0.0),
        total: status.duration.map(|d| d.as_secs_f64()).unwrap_or(0.0),
    }
}

/// Poll snapshot from one `status` + `currentsong` exchange.
pub fn snapshot_from(status: &Status, song: Option<Song>) -> PollSnapshot {
    PollSnapshot {
        song: song.map(current_song_from),
        transport: transport_of(status),
        modes: modes_of(status),
        position: position_of(status),
        queue_version: status.queue_version,
    }
}

/// Cover image sitting next to `song_file` inside `music_directory`.
pub fn find_cover(music_directory: &Path, song_file: &str) -> Option<PathBuf> {
    let song_path = music_directory.join(song_file);
    let dir = song_path.parent()?;
    COVER_NAMES
        .iter()
        .flat_map(|name| {
            COVER_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}.{}", name, ext)))
        })
        .find(|candidate| candidate.is_file())
}

impl PlaybackService for MpdService {
    fn current_song(&self) -> ServiceResult<Option<CurrentSong>> {
        self.with_client(|client| {
            let song = client
                .currentsong()
                .map_err(ServiceError::command("currentsong"))?;
            Ok(song.map(current_song_from))
        })
    }

    fn album_art(&self) -> ServiceResult<Option<PathBuf>> {
        let file = self.current_song_file()?;
        Ok(file.and_then(|f| find_cover(&self.music_directory, &f)))
    }

    fn status(&self) -> ServiceResult<ModeFlags> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            Ok(modes_of(&status))
        })
    }

    fn playback_state(&self) -> ServiceResult<TransportState> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            Ok(transport_of(&status))
        })
    }

    fn position(&self) -> ServiceResult<Position> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            Ok(position_of(&status))
        })
    }

    fn queue_version(&self) -> ServiceResult<u32> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            Ok(status.queue_version)
        })
    }

    fn snapshot(&self) -> ServiceResult<PollSnapshot> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            let song = client
                .currentsong()
                .map_err(ServiceError::command("currentsong"))?;
            Ok(snapshot_from(&status, song))
        })
    }

    fn set_position(&self, fraction: f64) -> ServiceResult<()> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            let song = client
                .currentsong()
                .map_err(ServiceError::command("currentsong"))?
                .ok_or(ServiceError::NoSongLoaded)?;
            let place = song.place.ok_or(ServiceError::NoSongLoaded)?;

            let total = status
                .duration
                .or(song.duration)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            if total <= 0.0 {
                return Err(ServiceError::NoSongLoaded);
            }

            let target = fraction.clamp(0.0, 1.0) * total;
            client
                .seek(place.id, target)
                .map_err(ServiceError::command("seekid"))
        })
    }

    fn toggle_playback(&self) -> ServiceResult<TransportState> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            match status.state {
                State::Play => {
                    client.pause(true).map_err(ServiceError::command("pause"))?;
                    Ok(TransportState::Paused)
                }
                State::Pause | State::Stop => {
                    client.play().map_err(ServiceError::command("play"))?;
                    Ok(TransportState::Playing)
                }
            }
        })
    }

    fn next(&self) -> ServiceResult<()> {
        self.with_client(|client| client.next().map_err(ServiceError::command("next")))
    }

    fn previous(&self) -> ServiceResult<()> {
        self.with_client(|client| client.prev().map_err(ServiceError::command("previous")))
    }

    fn toggle_mode(&self, mode: PlaybackMode) -> ServiceResult<()> {
        self.with_client(|client| {
            let status = client.status().map_err(ServiceError::command("status"))?;
            match mode {
                PlaybackMode::Random => client
                    .random(!status.random)
                    .map_err(ServiceError::command("random")),
                PlaybackMode::Repeat => client
                    .repeat(!status.repeat)
                    .map_err(ServiceError::command("repeat")),
                PlaybackMode::Single => client
                    .single(!status.single)
                    .map_err(ServiceError::command("single")),
            }
        })
    }

    fn queue(&self) -> ServiceResult<Vec<QueueEntry>> {
        self.with_client(|client| {
            let queue = client.queue().map_err(ServiceError::command("playlistinfo"))?;
            let current_id = client
                .currentsong()
                .ok()
                .flatten()
                .and_then(|s| s.place)
                .map(|p| p.id.0);

            Ok(queue
                .into_iter()
                .enumerate()
                .map(|(idx, song)| {
                    let position = song.place.as_ref().map(|p| p.pos).unwrap_or(idx as u32);
                    let id = song.place.as_ref().map(|p| p.id.0);
                    let duration_seconds = song
                        .duration
                        .map(|d| whole_seconds(d.as_secs_f64()))
                        .unwrap_or(0);
                    let current = current_song_from(song);
                    QueueEntry {
                        position,
                        uri: current.uri,
                        title: current.title,
                        artist: current.artist,
                        duration_seconds,
                        is_active: current_id.is_some() && id == current_id,
                    }
                })
                .collect())
        })
    }

    fn play_at(&self, position: u32) -> ServiceResult<()> {
        self.with_client(|client| client.switch(position).map_err(ServiceError::command("play")))
    }

    fn delete_at(&self, position: u32) -> ServiceResult<()> {
        self.with_client(|client| client.delete(position).map_err(ServiceError::command("delete")))
    }

    fn clear_queue(&self) -> ServiceResult<()> {
        self.with_client(|client| client.clear().map_err(ServiceError::command("clear")))
    }

    fn enqueue(&self, uris: &[String]) -> ServiceResult<()> {
        self.with_client(|client| {
            for uri in uris {
                let song = Song {
                    file: uri.clone(),
                    ..Default::default()
                };
                client.push(&song).map_err(ServiceError::command("addid"))?;
            }
            Ok(())
        })
    }

    fn load_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>> {
        catalog_cache::read(&self.catalog_cache)
    }

    fn rebuild_catalog(&self) -> ServiceResult<Option<CatalogSnapshot>> {
        let records = self.with_client(|client| {
            let mut records = Vec::new();
            collect_tracks(client, "", &mut records).map_err(ServiceError::command("lsinfo"))?;
            Ok(records)
        })?;

        let snapshot = group_tracks(records);
        if snapshot.is_empty() {
            return Ok(None);
        }

        tracing::info!(
            artists = snapshot.artists.len(),
            songs = snapshot.song_count(),
            "catalog rebuilt"
        );
        if let Err(e) = catalog_cache::write(&self.catalog_cache, &snapshot) {
            tracing::warn!(error = %e, "could not write catalog cache");
        }
        Ok(Some(snapshot))
    }
}
