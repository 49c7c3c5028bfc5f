//! Setlist normalization: raw per-song rows into ordered, display-ready sets.
//!
//! The whole pass is deterministic given input order. Footnotes are numbered
//! in a pre-pass so that a footnote's number depends only on the first song
//! that carries it, then songs are grouped into sets in encounter order and
//! joined into one display string per set.

use crate::api::types::RawSongRecord;
use crate::setlist::model::{FootnoteEntry, NormalizedSet, SetlistFragment};
use crate::setlist::ActFilter;

/// Normalize raw setlist rows into sets, show notes, and numbered footnotes.
///
/// Rows not belonging to `act` are ignored. An empty filtered list yields an
/// empty fragment; the caller decides whether that means "no show" or "show
/// with no setlist yet".
pub fn normalize(raw_songs: &[RawSongRecord], act: &ActFilter) -> SetlistFragment {
    let songs: Vec<&RawSongRecord> = raw_songs.iter().filter(|s| act.matches_song(s)).collect();
    if songs.is_empty() {
        return SetlistFragment::default();
    }

    let coach_notes = assign_footnotes(&songs);

    // Accumulated set text keyed by canonical set name, in first-encounter
    // order. A Vec keeps that order; shows have a handful of sets at most.
    let mut sets: Vec<(String, String)> = Vec::new();
    let mut notes: Option<String> = None;

    for song in &songs {
        let shownotes = song.shownotes.trim();
        if !shownotes.is_empty() {
            // last-write-wins across the full scan
            notes = Some(shownotes.to_string());
        }

        let text = song_display_text(song, &coach_notes);
        let key = set_key(&song.settype, song.setnumber);
        match sets.iter_mut().find(|(name, _)| *name == key) {
            Some((_, acc)) => {
                if acc.ends_with('>') {
                    acc.push(' ');
                } else {
                    acc.push_str(", ");
                }
                acc.push_str(&text);
            }
            None => sets.push((key, text)),
        }
    }

    let sets = sets
        .into_iter()
        .map(|(name, raw_text)| NormalizedSet {
            name,
            songs_text: clean_songs_text(&raw_text),
        })
        .filter(|set| !set.songs_text.is_empty())
        .collect();

    SetlistFragment {
        sets,
        notes,
        coach_notes,
    }
}

/// Number each distinct footnote in order of first appearance, 1-based.
/// Songs sharing identical footnote text share one number.
fn assign_footnotes(songs: &[&RawSongRecord]) -> Vec<FootnoteEntry> {
    let mut entries: Vec<FootnoteEntry> = Vec::new();
    for song in songs {
        let text = song.footnote.trim();
        if text.is_empty() || entries.iter().any(|e| e.text == text) {
            continue;
        }
        entries.push(FootnoteEntry {
            number: (entries.len() + 1).to_string(),
            text: text.to_string(),
        });
    }
    entries
}

/// Per-song display text: name, footnote reference, transition marker.
fn song_display_text(song: &RawSongRecord, footnotes: &[FootnoteEntry]) -> String {
    let mut text = song.songname.trim().to_string();

    let footnote = song.footnote.trim();
    if !footnote.is_empty() {
        if let Some(entry) = footnotes.iter().find(|e| e.text == footnote) {
            text.push_str(&format!("[{}]", entry.number));
        }
    }

    let transition = song.transition.trim();
    if transition == "->" {
        text.push_str(" ->");
    } else if !transition.is_empty() {
        text.push_str(" >");
    }

    text
}

/// Canonical set name for a song row.
///
/// Encore spellings collapse to "Encore"; everything else keys on the set
/// number. A missing number still yields a (degenerate) named set so the song
/// is not silently dropped.
fn set_key(settype: &str, setnumber: Option<i64>) -> String {
    let settype = settype.trim();
    if settype.eq_ignore_ascii_case("encore") || settype.eq_ignore_ascii_case("e") {
        "Encore".to_string()
    } else {
        match setnumber {
            Some(n) => format!("Set {n}"),
            None => "Set ?".to_string(),
        }
    }
}

/// Cleanup for an accumulated set string: collapse whitespace runs, drop empty
/// comma segments, and strip any dangling transition marker at the end.
fn clean_songs_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::new();
    for part in collapsed.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if out.is_empty() {
            out.push_str(part);
        } else if out.ends_with('>') {
            out.push(' ');
            out.push_str(part);
        } else {
            out.push_str(", ");
            out.push_str(part);
        }
    }

    loop {
        let stripped = out
            .trim_end()
            .trim_end_matches("->")
            .trim_end_matches('>')
            .trim_end()
            .to_string();
        if stripped == out {
            break;
        }
        out = stripped;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(setnumber: Option<i64>, settype: &str, name: &str, transition: &str) -> RawSongRecord {
        RawSongRecord {
            artist: "Goose".to_string(),
            artist_id: Some(1),
            showdate: "2024-06-21".to_string(),
            setnumber,
            settype: settype.to_string(),
            songname: name.to_string(),
            transition: transition.to_string(),
            ..Default::default()
        }
    }

    fn act() -> ActFilter {
        ActFilter::new("Goose", Some(1))
    }

    #[test]
    fn groups_songs_with_transition_markers() {
        let songs = vec![
            song(Some(1), "Set", "Intro", "->"),
            song(Some(1), "Set", "Jam", ""),
        ];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets.len(), 1);
        assert_eq!(fragment.sets[0].name, "Set 1");
        assert_eq!(fragment.sets[0].songs_text, "Intro -> Jam");
    }

    #[test]
    fn comma_separates_songs_without_transitions() {
        let songs = vec![
            song(Some(1), "Set", "Hungersite", ""),
            song(Some(1), "Set", "Arcadia", ">"),
            song(Some(1), "Set", "Hot Tea", ""),
        ];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets[0].songs_text, "Hungersite, Arcadia > Hot Tea");
    }

    #[test]
    fn sets_appear_in_first_encounter_order() {
        let songs = vec![
            song(Some(1), "Set", "Opener", ""),
            song(Some(2), "Set", "Second Set Opener", ""),
            song(Some(1), "Set", "Stray Set One Song", ""),
            song(None, "Encore", "Closer", ""),
        ];
        let fragment = normalize(&songs, &act());
        let names: Vec<&str> = fragment.sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Set 1", "Set 2", "Encore"]);
        assert_eq!(
            fragment.sets[0].songs_text,
            "Opener, Stray Set One Song"
        );
    }

    #[test]
    fn encore_spellings_canonicalize() {
        for settype in ["encore", "Encore", "ENCORE", "e", "E"] {
            let songs = vec![song(None, settype, "Closer", "")];
            let fragment = normalize(&songs, &act());
            assert_eq!(fragment.sets[0].name, "Encore", "settype {settype:?}");
        }
    }

    #[test]
    fn null_set_number_keeps_the_song_under_a_degenerate_name() {
        let songs = vec![song(None, "Set", "Orphan Song", "")];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets[0].name, "Set ?");
        assert_eq!(fragment.sets[0].songs_text, "Orphan Song");
    }

    #[test]
    fn shared_footnote_text_gets_one_number() {
        let mut first = song(Some(1), "Set", "Give It Time", "");
        first.footnote = "Debut".to_string();
        let mut second = song(Some(1), "Set", "Iguana Song", "");
        second.footnote = "Debut".to_string();

        let fragment = normalize(&[first, second], &act());
        assert_eq!(fragment.coach_notes.len(), 1);
        assert_eq!(fragment.coach_notes[0].number, "1");
        assert_eq!(fragment.coach_notes[0].text, "Debut");
        assert_eq!(
            fragment.sets[0].songs_text,
            "Give It Time[1], Iguana Song[1]"
        );
    }

    #[test]
    fn footnote_numbers_follow_first_occurrence_order() {
        let mut a = song(Some(1), "Set", "A", "");
        a.footnote = "With Stuart Bogie".to_string();
        let b = song(Some(1), "Set", "B", "");
        let mut c = song(Some(2), "Set", "C", "");
        c.footnote = "Unfinished".to_string();
        let mut d = song(Some(2), "Set", "D", "");
        d.footnote = "With Stuart Bogie".to_string();

        let fragment = normalize(&[a.clone(), b.clone(), c.clone(), d.clone()], &act());
        let numbered: Vec<(&str, &str)> = fragment
            .coach_notes
            .iter()
            .map(|n| (n.number.as_str(), n.text.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![("1", "With Stuart Bogie"), ("2", "Unfinished")]
        );

        // Reordering songs that carry no footnote leaves the numbering alone.
        let reordered = normalize(&[b, a, c, d], &act());
        assert_eq!(reordered.coach_notes, fragment.coach_notes);
    }

    #[test]
    fn show_notes_last_write_wins() {
        let mut a = song(Some(1), "Set", "A", "");
        a.shownotes = "early notes".to_string();
        let b = song(Some(1), "Set", "B", "");
        let mut c = song(Some(2), "Set", "C", "");
        c.shownotes = "final notes".to_string();

        let fragment = normalize(&[a, b, c], &act());
        assert_eq!(fragment.notes.as_deref(), Some("final notes"));
    }

    #[test]
    fn other_artists_are_filtered_out() {
        let mut opener = song(Some(1), "Set", "Opening Act Song", "");
        opener.artist = "Vasudo".to_string();
        opener.artist_id = Some(9);
        let headliner = song(Some(1), "Set", "Hungersite", "");

        let fragment = normalize(&[opener, headliner], &act());
        assert_eq!(fragment.sets.len(), 1);
        assert_eq!(fragment.sets[0].songs_text, "Hungersite");
    }

    #[test]
    fn empty_filtered_list_yields_empty_fragment() {
        let mut other = song(Some(1), "Set", "Song", "");
        other.artist = "Billy Strings".to_string();

        let fragment = normalize(&[other], &act());
        assert!(fragment.is_empty());

        let fragment = normalize(&[], &act());
        assert!(fragment.is_empty());
    }

    #[test]
    fn trailing_transition_is_stripped() {
        let songs = vec![
            song(Some(1), "Set", "Into The Myst", ">"),
            song(Some(1), "Set", "Dripfield", "->"),
        ];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets[0].songs_text, "Into The Myst > Dripfield");
    }

    #[test]
    fn nameless_rows_do_not_leave_stray_separators() {
        let songs = vec![
            song(Some(1), "Set", "A", ""),
            song(Some(1), "Set", "", ""),
            song(Some(1), "Set", "B", ""),
        ];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets[0].songs_text, "A, B");
    }

    #[test]
    fn set_with_only_empty_rows_is_not_emitted() {
        let songs = vec![song(Some(3), "Set", "  ", "")];
        let fragment = normalize(&songs, &act());
        assert!(fragment.sets.is_empty());
    }

    #[test]
    fn whitespace_runs_collapse_in_song_text() {
        let songs = vec![song(Some(1), "Set", "Turned   Clouds", "")];
        let fragment = normalize(&songs, &act());
        assert_eq!(fragment.sets[0].songs_text, "Turned Clouds");
    }

    #[test]
    fn canonical_set_names_map_to_themselves() {
        // Already-normalized inputs must not regroup: "Encore" stays "Encore"
        // and a numbered "Set" keeps its number.
        let variant = normalize(&[song(None, "e", "Closer", "")], &act());
        let canonical = normalize(&[song(None, "Encore", "Closer", "")], &act());
        assert_eq!(variant.sets, canonical.sets);

        let numbered = normalize(&[song(Some(2), "Set", "Opener", "")], &act());
        assert_eq!(numbered.sets[0].name, "Set 2");
    }
}
