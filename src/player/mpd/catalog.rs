use crate::player::wire::{
    find_tag, parse_track_number, parse_year, CatalogSnapshot, WireAlbum, WireArtist, WireSong,
};
use std::collections::HashMap;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

/// One song as read from the MPD database, before grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub uri: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: Option<u32>,
    pub track: Option<u32>,
    pub duration: u64,
}

impl TrackRecord {
    pub fn from_song(song: &mpd::Song) -> Self {
        let file_name = song
            .file
            .split('/')
            .next_back()
            .unwrap_or(&song.file)
            .to_string();

        let title = song
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(file_name);

        let artist = song
            .artist
            .clone()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| find_tag(&song.tags, "Artist").map(str::to_string))
            .or_else(|| find_tag(&song.tags, "AlbumArtist").map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Self {
            uri: song.file.clone(),
            title,
            artist,
            album: find_tag(&song.tags, "Album")
                .unwrap_or(UNKNOWN_ALBUM)
                .to_string(),
            year: find_tag(&song.tags, "Date").and_then(parse_year),
            track: find_tag(&song.tags, "Track").and_then(parse_track_number),
            duration: song.duration.map(|d| d.as_secs()).unwrap_or(0),
        }
    }
}

/// Group flat records into the Artist → Album → Song shape.
///
/// Artists sort case-insensitively by name, albums by (year, name), songs by
/// track number and then by the order they were read.
pub fn group_tracks(records: Vec<TrackRecord>) -> CatalogSnapshot {
    let mut artists: Vec<WireArtist> = Vec::new();
    let mut artist_index: HashMap<String, usize> = HashMap::new();
    let mut album_index: HashMap<(usize, String, Option<u32>), usize> = HashMap::new();
    let mut track_numbers: HashMap<String, Option<u32>> = HashMap::new();

    for record in records {
        let a_idx = *artist_index.entry(record.artist.clone()).or_insert_with(|| {
            artists.push(WireArtist {
                name: record.artist.clone(),
                albums: Vec::new(),
            });
            artists.len() - 1
        });

        let albums = &mut artists[a_idx].albums;
        let b_idx = *album_index
            .entry((a_idx, record.album.clone(), record.year))
            .or_insert_with(|| {
                albums.push(WireAlbum {
                    name: record.album.clone(),
                    year: record.year,
                    songs: Vec::new(),
                });
                albums.len() - 1
            });

        track_numbers.insert(record.uri.clone(), record.track);
        albums[b_idx]
            .songs
            .push(WireSong::new(record.uri, record.title, record.duration));
    }

    for artist in &mut artists {
        for album in &mut artist.albums {
            // Stable: equal track numbers keep read order
            album.songs.sort_by_key(|s| {
                let n = track_numbers.get(&s.uri).copied().flatten();
                (n.is_none(), n)
            });
        }
        artist.albums.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
    }
    artists.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    CatalogSnapshot { artists }
}

/// Recursively read every song under `path` (`listfiles` for folders,
/// `lsinfo` for tagged songs).
pub fn collect_tracks(
    mpd: &mut mpd::Client,
    path: &str,
    out: &mut Vec<TrackRecord>,
) -> Result<(), mpd::error::Error> {
    let songs = mpd.lsinfo(&mpd::Song {
        file: path.to_string(),
        ..Default::default()
    })?;
    for song in &songs {
        let name = song.file.split('/').next_back().unwrap_or(&song.file);
        if name.starts_with('.') || name.trim().is_empty() {
            continue;
        }
        out.push(TrackRecord::from_song(song));
    }

    let mut entries = mpd.listfiles(path)?;
    entries.sort_by(|(_, a), (_, b)| a.to_lowercase().cmp(&b.to_lowercase()));

    for (kind, name) in entries {
        if kind != "directory" {
            continue;
        }
        let display = name.split('/').next_back().unwrap_or(&name);
        if display.starts_with('.') || display.trim().is_empty() {
            continue;
        }
        let full_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", path, name)
        };
        // A broken subfolder should not abort the whole rebuild
        if let Err(e) = collect_tracks(mpd, &full_path, out) {
            tracing::debug!(path = %full_path, error = %e, "skipping unreadable folder");
        }
    }

    Ok(())
}
