//! Song play statistics derived from the full performance history.

use crate::api::types::RawSongRecord;
use crate::setlist::{decode_entities, SETLIST_URL_BASE};
use serde::Serialize;

/// One performance of a song: when, where, and a link to the full setlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayRef {
    pub date: String,
    pub venue: String,
    pub url: Option<String>,
}

impl PlayRef {
    pub fn from_raw(raw: &RawSongRecord) -> Self {
        Self {
            date: raw.showdate.clone(),
            venue: decode_entities(&raw.venuename),
            url: (!raw.permalink.is_empty())
                .then(|| format!("{SETLIST_URL_BASE}/{}", raw.permalink)),
        }
    }
}

/// Play-count summary for one song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongStats {
    pub song_name: String,
    pub times_played: usize,
    pub first_play: PlayRef,
    pub last_play: PlayRef,
    /// Present only when the song has been played more than once.
    pub second_last_play: Option<PlayRef>,
}

/// Title-case a song name for display, keeping a few stylized lowercase
/// parenthetical suffixes as-is.
pub fn format_song_name(name: &str) -> String {
    const KEEP_LOWER: [&str; 2] = ["(satellite)", "(dawn)"];

    name.to_lowercase()
        .split_whitespace()
        .map(|word| {
            if KEEP_LOWER.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_song_names_in_title_case() {
        assert_eq!(format_song_name("hot tea"), "Hot Tea");
        assert_eq!(format_song_name("ARROW"), "Arrow");
    }

    #[test]
    fn keeps_stylized_suffixes_lowercase() {
        assert_eq!(format_song_name("moon rising (satellite)"), "Moon Rising (satellite)");
        assert_eq!(format_song_name("seekers on the ridge (dawn)"), "Seekers On The Ridge (dawn)");
    }

    #[test]
    fn play_ref_decodes_venue_and_links_permalink() {
        let raw = RawSongRecord {
            showdate: "2016-10-29".to_string(),
            venuename: "Nectar&#39;s".to_string(),
            permalink: "goose-october-29-2016.html".to_string(),
            ..Default::default()
        };
        let play = PlayRef::from_raw(&raw);
        assert_eq!(play.venue, "Nectar's");
        assert_eq!(
            play.url.as_deref(),
            Some("https://elgoose.net/setlists/goose-october-29-2016.html")
        );
    }
}
