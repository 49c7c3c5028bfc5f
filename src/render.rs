//! Plain-text rendering of normalized records.
//!
//! This is the CLI's stand-in for the chat platform's rich-message
//! presentation; the embedding bot renders `NormalizedShow` into its own
//! message objects instead.

use crate::live::LiveUpdate;
use crate::setlist::{NormalizedShow, SongStats};
use chrono::NaiveDate;

/// Render a resolved show. `live` appends the live-tracking footer.
pub fn render_show(show: &NormalizedShow, live: bool) -> String {
    let mut out = format!(
        "{} - {}\n{}\n{}\n",
        show.artist,
        display_date(&show.show_date),
        show.venue_name,
        show.location
    );

    if show.sets.is_empty() {
        out.push_str("\nSetlist information is being updated. Check back later.\n");
    } else {
        for set in &show.sets {
            out.push_str(&format!("\n{}: {}\n", set.name, set.songs_text));
        }
    }

    if let Some(notes) = &show.notes {
        out.push_str(&format!("\nShow Notes: {notes}\n"));
    }

    if !show.coach_notes.is_empty() {
        out.push_str("\nCoach's Notes:\n");
        for note in &show.coach_notes {
            out.push_str(&format!("[{}] {}\n", note.number, note.text));
        }
    }

    if let Some(url) = &show.url {
        out.push_str(&format!("\nFull setlist: {url}\n"));
    }

    if live {
        out.push_str("\nLive setlist tracking. Updates every 5 minutes.\n");
    }

    out
}

/// Render one live-tracking message state.
pub fn render_update(update: &LiveUpdate) -> String {
    match update {
        LiveUpdate::Live(show) => render_show(show, true),
        LiveUpdate::Waiting { date } => {
            format!("No setlist found for {date} yet. Retrying in 5 minutes...")
        }
        LiveUpdate::Closing(Some(show)) => render_show(show, false),
        LiveUpdate::Closing(None) => {
            "No setlist was posted during this tracking session.".to_string()
        }
    }
}

/// Render a song's play-history summary.
pub fn render_stats(stats: &SongStats) -> String {
    let mut out = format!(
        "{}\nTotal times played: {}\n",
        stats.song_name, stats.times_played
    );

    out.push_str(&format!(
        "First played: {} at {}\n",
        display_date(&stats.first_play.date),
        stats.first_play.venue
    ));
    out.push_str(&format!(
        "Last played: {} at {}\n",
        display_date(&stats.last_play.date),
        stats.last_play.venue
    ));
    if let Some(play) = &stats.second_last_play {
        out.push_str(&format!(
            "Played before that: {} at {}\n",
            display_date(&play.date),
            play.venue
        ));
    }
    if let Some(url) = &stats.last_play.url {
        out.push_str(&format!("Most recent setlist: {url}\n"));
    }

    out
}

fn display_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}
