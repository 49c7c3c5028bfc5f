//! Error types for the data-source fetch boundary.

use thiserror::Error;

/// Failures surfaced by the data fetch adapter.
///
/// Only the adapter and its direct callers see these; the show resolver
/// absorbs all of them into "no show" or degraded-but-present data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the data source.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Response body was not the JSON we expected.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The data source reported failure in its response envelope.
    #[error("API error: {0}")]
    Remote(String),
}

impl FetchError {
    /// True when retrying the same request later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::HttpStatus(_))
    }
}
