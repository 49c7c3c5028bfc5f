//! gaggle - setlist chat-bot core for Goose.
//!
//! Fetches show and setlist data from the elgoose.net v2 API, normalizes the
//! loosely structured records into display-ready setlists, and can keep a
//! single status message current during a live show. Chat-platform
//! connectivity stays outside this crate behind the [`live::MessageSink`]
//! trait; the bundled binary drives the same handlers from the command line.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod live;
pub mod render;
pub mod setlist;

pub use crate::config::Config;
pub use crate::error::FetchError;
