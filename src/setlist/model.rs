//! Display-ready setlist structures.

use crate::api::types::RawShowRecord;
use crate::setlist::{decode_entities, SETLIST_URL_BASE};
use serde::Serialize;

/// One set of a show, songs already joined into display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSet {
    /// "Set 1", "Set 2", ... or "Encore".
    pub name: String,
    /// Songs in played order with transition markers, separators cleaned.
    pub songs_text: String,
}

/// A numbered footnote attached to one or more songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FootnoteEntry {
    /// 1-based sequential number in first-occurrence order, as a string.
    pub number: String,
    pub text: String,
}

/// The normalizer's output: the setlist-derived part of a show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetlistFragment {
    pub sets: Vec<NormalizedSet>,
    pub notes: Option<String>,
    pub coach_notes: Vec<FootnoteEntry>,
}

impl SetlistFragment {
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.notes.is_none() && self.coach_notes.is_empty()
    }
}

/// Canonical, display-ready representation of one date's show.
///
/// Constructed fresh per query or live tick, never mutated afterwards and
/// never persisted; the data source stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedShow {
    /// ISO date, `YYYY-MM-DD`.
    pub show_date: String,
    /// Performer name as the data source reports it.
    pub artist: String,
    pub venue_name: String,
    pub location: String,
    /// Permalink to the full setlist page, when the source provides one.
    pub url: Option<String>,
    pub sets: Vec<NormalizedSet>,
    pub notes: Option<String>,
    pub coach_notes: Vec<FootnoteEntry>,
}

impl NormalizedShow {
    /// Build the base show record from a raw show row. Sets and notes come
    /// later from the setlist detail fetch, if it succeeds.
    pub fn from_raw(raw: &RawShowRecord) -> Self {
        Self {
            show_date: raw.showdate.clone(),
            artist: raw.artist.clone(),
            venue_name: decode_entities(&raw.venuename),
            location: raw.location.clone(),
            url: (!raw.permalink.is_empty())
                .then(|| format!("{SETLIST_URL_BASE}/{}", raw.permalink)),
            sets: Vec::new(),
            notes: None,
            coach_notes: Vec::new(),
        }
    }

    /// Merge a normalized fragment in, filling missing fields only.
    ///
    /// A field already present on the base record is never blanked by an
    /// empty fragment field.
    pub fn merge_fragment(&mut self, fragment: SetlistFragment) {
        if !fragment.sets.is_empty() {
            self.sets = fragment.sets;
        }
        if fragment.notes.as_deref().is_some_and(|n| !n.is_empty()) {
            self.notes = fragment.notes;
        }
        if !fragment.coach_notes.is_empty() {
            self.coach_notes = fragment.coach_notes;
        }
    }
}
