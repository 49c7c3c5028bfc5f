//! Data-source boundary: HTTP client and raw record shapes.

pub mod client;
pub mod types;

pub use client::{ApiClient, RecordSource};
pub use types::{RawShowRecord, RawSongRecord};
