//! Exchanged catalog shape and the normalisation of MPD's string-encoded
//! values into native types.
//!
//! ```json
//! { "artists": [ { "name": "…", "albums": [ { "name": "…", "year": 1997,
//!   "songs": [ { "uri": "…", "title": "…", "url": "…", "duration": 241 } ] } ] } ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub artists: Vec<WireArtist>,
}

impl CatalogSnapshot {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn song_count(&self) -> usize {
        self.artists
            .iter()
            .flat_map(|a| a.albums.iter())
            .map(|album| album.songs.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireArtist {
    pub name: String,
    #[serde(default)]
    pub albums: Vec<WireAlbum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAlbum {
    pub name: String,
    #[serde(default, deserialize_with = "de_year")]
    pub year: Option<u32>,
    #[serde(default)]
    pub songs: Vec<WireSong>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSong {
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de_duration")]
    pub duration: u64,
}

impl WireSong {
    pub fn new(uri: String, title: String, duration: u64) -> Self {
        Self {
            url: Some(uri.clone()),
            uri,
            title,
            duration,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn de_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) if n.is_finite() && n >= 1.0 => Some(n as u32),
        Some(NumberOrText::Text(s)) => parse_year(&s),
        _ => None,
    })
}

fn de_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let seconds = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    };
    Ok(whole_seconds(seconds))
}

/// Truncate to whole seconds; negative and non-finite values become 0.
pub fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

/// Year from an MPD `Date` tag ("1997", "1997-05-21", …).
pub fn parse_year(date: &str) -> Option<u32> {
    let digits: String = date.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok().filter(|y| *y > 0)
    } else {
        None
    }
}

/// Track number from an MPD `Track` tag ("3" or "3/12").
pub fn parse_track_number(track: &str) -> Option<u32> {
    track.split('/').next()?.trim().parse().ok()
}

/// Case-insensitive tag lookup on an MPD song's raw tag list.
pub fn find_tag<'a>(tags: &'a [(String, String)], key: &str) -> Option<&'a str> {
    tags.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_and_text_years() {
        let json = r#"{ "artists": [ { "name": "Low", "albums": [
            { "name": "Things We Lost in the Fire", "year": 2001, "songs": [] },
            { "name": "Trust", "year": "2002-09-17", "songs": [] },
            { "name": "Untitled", "year": "n/a", "songs": [] },
            { "name": "Missing", "songs": [] }
        ] } ] }"#;

        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        let years: Vec<_> = snapshot.artists[0].albums.iter().map(|a| a.year).collect();
        assert_eq!(years, vec![Some(2001), Some(2002), None, None]);
    }

    #[test]
    fn decodes_float_and_missing_durations() {
        let json = r#"{ "artists": [ { "name": "A", "albums": [ { "name": "B", "year": null, "songs": [
            { "uri": "a/1.flac", "title": "One", "url": "a/1.flac", "duration": 241.7 },
            { "uri": "a/2.flac", "title": "Two", "duration": "12" },
            { "uri": "a/3.flac" }
        ] } ] } ] }"#;

        let snapshot: CatalogSnapshot = serde_json::from_str(json).unwrap();
        let songs = &snapshot.artists[0].albums[0].songs;
        assert_eq!(songs[0].duration, 241);
        assert_eq!(songs[1].duration, 12);
        assert_eq!(songs[2].duration, 0);
        assert_eq!(songs[2].title, "");
        assert_eq!(songs[1].url, None);
        assert_eq!(snapshot.song_count(), 3);
    }

    #[test]
    fn written_songs_carry_url_equal_to_uri() {
        let song = WireSong::new("x/y.mp3".into(), "Y".into(), 10);
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["url"], "x/y.mp3");
        assert_eq!(value["uri"], "x/y.mp3");
    }

    #[test]
    fn parses_track_and_year_tags() {
        assert_eq!(parse_track_number("3/12"), Some(3));
        assert_eq!(parse_track_number(" 7 "), Some(7));
        assert_eq!(parse_track_number("A"), None);
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("99"), None);
    }

    #[test]
    fn tag_lookup_ignores_case_and_blank_values() {
        let tags = vec![
            ("ALBUM".to_string(), "Kid A".to_string()),
            ("Artist".to_string(), "  ".to_string()),
        ];
        assert_eq!(find_tag(&tags, "album"), Some("Kid A"));
        assert_eq!(find_tag(&tags, "Artist"), None);
    }
}
