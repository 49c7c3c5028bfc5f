//! Show resolution: two fetches merged into one coherent show record.
//!
//! The resolver never fails. A broken base fetch reads as "unreachable" or
//! "no show" depending on whether retrying could help; a broken detail fetch
//! degrades to the base record with an empty setlist.

use crate::api::client::RecordSource;
use crate::setlist::model::NormalizedShow;
use crate::setlist::stats::{PlayRef, SongStats};
use crate::setlist::{decode_entities, normalize, ActFilter};

/// Outcome of resolving a date.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A show for the tracked act, possibly without setlist detail yet.
    Show(NormalizedShow),
    /// The data source answered, but no show matches the act and date.
    Absent,
    /// The base fetch failed in a way that may clear up on retry; nothing
    /// can be shown this time.
    Unreachable,
}

impl Resolution {
    /// Collapse to the show itself, reading both failure states as "nothing
    /// to display".
    pub fn into_show(self) -> Option<NormalizedShow> {
        match self {
            Resolution::Show(show) => Some(show),
            Resolution::Absent | Resolution::Unreachable => None,
        }
    }
}

pub struct ShowResolver<S> {
    source: S,
    act: ActFilter,
}

impl<S: RecordSource> ShowResolver<S> {
    pub fn new(source: S, act: ActFilter) -> Self {
        Self { source, act }
    }

    /// The act this resolver tracks.
    pub fn act(&self) -> &ActFilter {
        &self.act
    }

    /// Resolve a date (`YYYY-MM-DD`) to a show record, or `None` when
    /// nothing can be shown. Callers that word their replies differently for
    /// "no show" versus "source unreachable" use [`Self::resolve_status`].
    pub async fn resolve(&self, date: &str) -> Option<NormalizedShow> {
        self.resolve_status(date).await.into_show()
    }

    /// Resolve a date, keeping "no such show" distinct from "could not reach
    /// the data source".
    pub async fn resolve_status(&self, date: &str) -> Resolution {
        let shows = match self.source.shows_on(date).await {
            Ok(shows) => shows,
            Err(err) => {
                tracing::warn!(date = %date, error = %err, "Base show fetch failed");
                // A remote or decode failure will not clear up on retry, so
                // it reads as a missing show rather than an outage.
                return if err.is_transient() {
                    Resolution::Unreachable
                } else {
                    Resolution::Absent
                };
            }
        };

        let Some(base) = shows
            .into_iter()
            .find(|show| self.act.matches_show(show) && show.showdate == date)
        else {
            return Resolution::Absent;
        };
        let mut show = NormalizedShow::from_raw(&base);

        let songs = match self.source.setlist_on(date).await {
            Ok(songs) => songs,
            Err(err) => {
                tracing::warn!(
                    date = %date,
                    error = %err,
                    "Setlist detail fetch failed, returning base show only"
                );
                return Resolution::Show(show);
            }
        };

        let fragment = normalize::normalize(&songs, &self.act);
        show.merge_fragment(fragment);

        tracing::debug!(
            date = %date,
            venue = %show.venue_name,
            sets = show.sets.len(),
            "Resolved show"
        );
        Resolution::Show(show)
    }

    /// Summarize a song's play history, or `None` when the act has never
    /// played it (or the history cannot be fetched).
    pub async fn song_stats(&self, song_name: &str) -> Option<SongStats> {
        let plays = match self.source.plays_of(song_name).await {
            Ok(plays) => plays,
            Err(err) => {
                tracing::warn!(song = %song_name, error = %err, "Play history fetch failed");
                return None;
            }
        };

        let plays: Vec<_> = plays
            .into_iter()
            .filter(|play| self.act.matches_artist(&play.artist))
            .collect();

        let first = plays.first()?;
        let last = plays.last()?;
        let second_last = (plays.len() > 1).then(|| PlayRef::from_raw(&plays[plays.len() - 2]));

        Some(SongStats {
            song_name: decode_entities(&first.songname),
            times_played: plays.len(),
            first_play: PlayRef::from_raw(first),
            last_play: PlayRef::from_raw(last),
            second_last_play: second_last,
        })
    }
}
