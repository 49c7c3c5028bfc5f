//! Command surface: argument validation and user-facing reply text.
//!
//! The chat platform maps its slash commands onto these handlers 1:1; the CLI
//! binary does the same. Replies are plain language and never leak internal
//! error text; an invalid date is rejected before any network call.

use crate::api::client::RecordSource;
use crate::render;
use crate::setlist::{stats, Resolution, ShowResolver};
use chrono::NaiveDate;

/// Parse a user-supplied date argument, accepting `/` as a separator variant,
/// and return it in canonical `YYYY-MM-DD` form.
pub fn parse_date_arg(raw: &str) -> Result<String, String> {
    let candidate = raw.trim().replace('/', "-");
    match NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
        Ok(date) => Ok(date.format("%Y-%m-%d").to_string()),
        Err(_) => Err(
            "Invalid date format. Please use YYYY-MM-DD, for example 2024-03-15.".to_string(),
        ),
    }
}

/// Handle the query-by-date command.
pub async fn setlist_command<S: RecordSource>(resolver: &ShowResolver<S>, raw_date: &str) -> String {
    let date = match parse_date_arg(raw_date) {
        Ok(date) => date,
        Err(notice) => return notice,
    };

    match resolver.resolve_status(&date).await {
        Resolution::Show(show) => render::render_show(&show, false),
        Resolution::Absent => no_show_notice(&resolver.act().name, &date),
        Resolution::Unreachable => unreachable_notice(&date),
    }
}

/// Handle the song-statistics command.
pub async fn song_command<S: RecordSource>(resolver: &ShowResolver<S>, raw_name: &str) -> String {
    let name = raw_name.trim();
    if name.is_empty() {
        return "Please give a song name, for example: song hot tea".to_string();
    }

    match resolver.song_stats(name).await {
        Some(song_stats) => render::render_stats(&song_stats),
        None => format!(
            "No play history found for \"{}\". Check the spelling, or try again later \
             if the data source is unavailable.",
            stats::format_song_name(name)
        ),
    }
}

/// Handle the help command.
pub fn help_text() -> String {
    [
        "Available commands:",
        "  show <date>   Setlist for a date (YYYY-MM-DD or YYYY/MM/DD)",
        "  song <name>   Play statistics for a song",
        "  live          Track today's show, updating every 5 minutes",
    ]
    .join("\n")
}

fn no_show_notice(act_name: &str, date: &str) -> String {
    format!(
        "No {act_name} show found for {date}. The date may have no performance, or \
         may not be in the database yet."
    )
}

fn unreachable_notice(date: &str) -> String {
    format!(
        "Could not reach the setlist data source for {date}. Please try again in a \
         few minutes."
    )
}
