//! Raw record shapes returned by the elgoose.net v2 API.
//!
//! The API is loosely typed: fields come and go per endpoint and nulls are
//! common. Every field is defaulted here so that missing-key handling lives
//! in one decode step instead of being scattered through the normalizer.

use serde::Deserialize;

/// One row from `shows/showdate/{date}.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShowRecord {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<i64>,
    #[serde(default)]
    pub showdate: String,
    #[serde(default)]
    pub venuename: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub permalink: String,
}

/// One row from a setlist endpoint: a single performed song.
///
/// Order within the response is significant and determines in-set song order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSongRecord {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<i64>,
    #[serde(default)]
    pub showdate: String,
    /// Null for some encore rows; the normalizer keeps the song anyway.
    #[serde(default)]
    pub setnumber: Option<i64>,
    /// "Set", "Encore", or a single-letter encore shorthand.
    #[serde(default = "default_settype")]
    pub settype: String,
    /// May contain HTML entities; decoded only where displayed.
    #[serde(default)]
    pub songname: String,
    /// "" for a full stop, ">" for a segue, "->" for a seamless segue.
    #[serde(default)]
    pub transition: String,
    /// Free-text annotation, repeated verbatim on every song it applies to.
    #[serde(default)]
    pub footnote: String,
    /// Free-text show notes, repeated per song; last non-empty value wins.
    #[serde(default)]
    pub shownotes: String,
    #[serde(default)]
    pub venuename: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub permalink: String,
}

fn default_settype() -> String {
    "Set".to_string()
}
