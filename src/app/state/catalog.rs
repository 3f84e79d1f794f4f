use super::expansion::ExpansionState;
use crate::player::wire::{CatalogSnapshot, WireAlbum, WireArtist, WireSong};
use std::collections::HashMap;

/// Identity of an expandable catalog node.
///
/// `ordinal` counts earlier siblings with the same name (and year, for
/// albums), so two artists both called "Various" still get distinct keys
/// that survive a rebuild of the same library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Artist {
        name: String,
        ordinal: usize,
    },
    Album {
        artist: String,
        artist_ordinal: usize,
        name: String,
        year: Option<u32>,
        ordinal: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub uri: String,
    pub title: String,
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub key: NodeKey,
    pub name: String,
    pub year: Option<u32>,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub key: NodeKey,
    pub name: String,
    pub albums: Vec<Album>,
}

/// One visible line of the library panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogRow<'a> {
    Artist(&'a Artist),
    Album(&'a Album),
    Song(&'a Song),
}

impl CatalogRow<'_> {
    pub fn depth(&self) -> usize {
        match self {
            CatalogRow::Artist(_) => 0,
            CatalogRow::Album(_) => 1,
            CatalogRow::Song(_) => 2,
        }
    }

    pub fn key(&self) -> Option<&NodeKey> {
        match self {
            CatalogRow::Artist(artist) => Some(&artist.key),
            CatalogRow::Album(album) => Some(&album.key),
            CatalogRow::Song(_) => None,
        }
    }
}

/// Artist → Album → Song snapshot of the library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTree {
    artists: Vec<Artist>,
}

impl CatalogTree {
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut artist_seen: HashMap<String, usize> = HashMap::new();
        let artists = snapshot
            .artists
            .into_iter()
            .map(|WireArtist { name, albums }| {
                let counter = artist_seen.entry(name.clone()).or_insert(0);
                let artist_ordinal = *counter;
                *counter += 1;

                let mut album_seen: HashMap<(String, Option<u32>), usize> = HashMap::new();
                let albums = albums
                    .into_iter()
                    .map(|WireAlbum { name: album, year, songs }| {
                        let counter = album_seen.entry((album.clone(), year)).or_insert(0);
                        let ordinal = *counter;
                        *counter += 1;
                        Album {
                            key: NodeKey::Album {
                                artist: name.clone(),
                                artist_ordinal,
                                name: album.clone(),
                                year,
                                ordinal,
                            },
                            name: album,
                            year,
                            songs: songs.into_iter().map(Song::from).collect(),
                        }
                    })
                    .collect();

                Artist {
                    key: NodeKey::Artist {
                        name: name.clone(),
                        ordinal: artist_ordinal,
                    },
                    name,
                    albums,
                }
            })
            .collect();

        Self { artists }
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn find_artist(&self, key: &NodeKey) -> Option<&Artist> {
        self.artists.iter().find(|a| &a.key == key)
    }

    pub fn find_album(&self, key: &NodeKey) -> Option<&Album> {
        self.artists
            .iter()
            .flat_map(|a| a.albums.iter())
            .find(|album| &album.key == key)
    }

    /// URIs of every song under `key`, depth-first in listed order. Unknown
    /// keys yield nothing.
    pub fn collect_urls(&self, key: &NodeKey) -> Vec<String> {
        match key {
            NodeKey::Artist { .. } => self
                .find_artist(key)
                .map(|artist| {
                    artist
                        .albums
                        .iter()
                        .flat_map(|album| album.songs.iter())
                        .map(|song| song.uri.clone())
                        .collect()
                })
                .unwrap_or_default(),
            NodeKey::Album { .. } => self
                .find_album(key)
                .map(|album| album.songs.iter().map(|s| s.uri.clone()).collect())
                .unwrap_or_default(),
        }
    }

    /// Flatten the tree into rows, descending only into expanded nodes.
    pub fn visible_rows<'a>(&'a self, expansion: &ExpansionState) -> Vec<CatalogRow<'a>> {
        let mut rows = Vec::new();
        for artist in &self.artists {
            rows.push(CatalogRow::Artist(artist));
            if !expansion.is_expanded(&artist.key) {
                continue;
            }
            for album in &artist.albums {
                rows.push(CatalogRow::Album(album));
                if expansion.is_expanded(&album.key) {
                    rows.extend(album.songs.iter().map(CatalogRow::Song));
                }
            }
        }
        rows
    }
}

impl From<WireSong> for Song {
    fn from(song: WireSong) -> Self {
        Self {
            uri: song.uri,
            title: song.title,
            duration_seconds: song.duration,
        }
    }
}
