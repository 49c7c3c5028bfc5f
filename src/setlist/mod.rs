//! Setlist domain: normalization, show resolution, play statistics.

pub mod model;
pub mod normalize;
pub mod resolver;
pub mod stats;

pub use model::{FootnoteEntry, NormalizedSet, NormalizedShow, SetlistFragment};
pub use resolver::{Resolution, ShowResolver};
pub use stats::{PlayRef, SongStats};

use crate::api::types::{RawShowRecord, RawSongRecord};

/// Base URL for setlist permalinks on the public site.
pub const SETLIST_URL_BASE: &str = "https://elgoose.net/setlists";

/// Selects the tracked act's rows out of multi-artist API responses.
#[derive(Debug, Clone)]
pub struct ActFilter {
    /// Performer name, matched case-insensitively.
    pub name: String,
    /// Artist id cross-check for setlist rows, when the endpoint carries one.
    pub artist_id: Option<i64>,
}

impl ActFilter {
    pub fn new(name: impl Into<String>, artist_id: Option<i64>) -> Self {
        Self {
            name: name.into(),
            artist_id,
        }
    }

    /// Name-only match, for endpoints that do not carry an artist id.
    pub fn matches_artist(&self, artist: &str) -> bool {
        artist.eq_ignore_ascii_case(&self.name)
    }

    pub fn matches_show(&self, show: &RawShowRecord) -> bool {
        self.matches_artist(&show.artist)
    }

    pub fn matches_song(&self, song: &RawSongRecord) -> bool {
        self.matches_artist(&song.artist)
            && self.artist_id.map_or(true, |id| song.artist_id == Some(id))
    }
}

/// Decode HTML entities the API leaves in venue and song names.
pub fn decode_entities(text: &str) -> String {
    escaper::decode_html(text).unwrap_or_else(|_| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn act_filter_is_case_insensitive() {
        let act = ActFilter::new("Goose", Some(1));
        assert!(act.matches_artist("goose"));
        assert!(act.matches_artist("GOOSE"));
        assert!(!act.matches_artist("Vasudo"));
    }

    #[test]
    fn song_match_requires_artist_id_when_configured() {
        let act = ActFilter::new("Goose", Some(1));
        let mut song = RawSongRecord {
            artist: "Goose".to_string(),
            artist_id: Some(1),
            ..Default::default()
        };
        assert!(act.matches_song(&song));

        song.artist_id = Some(4);
        assert!(!act.matches_song(&song));

        let unchecked = ActFilter::new("Goose", None);
        assert!(unchecked.matches_song(&song));
    }

    #[test]
    fn entity_decoding_falls_back_to_raw_text() {
        assert_eq!(decode_entities("Hampton&#39;s"), "Hampton's");
        assert_eq!(decode_entities("The Salt Shed"), "The Salt Shed");
    }
}
