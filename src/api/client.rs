//! HTTP client for the elgoose.net v2 API.
//!
//! One request per call, no retry and no caching; callers decide whether to
//! retry or degrade. Most endpoints wrap their payload in an
//! `{error, error_message, data}` envelope but a few return a bare array, so
//! the unwrap handles both shapes.

use crate::api::types::{RawShowRecord, RawSongRecord};
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("gaggle/", env!("CARGO_PKG_VERSION"));

/// Read access to the setlist data source.
///
/// The resolver and live tracker talk to this trait so tests can substitute
/// a canned source for the network.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Shows scheduled on a date, all artists included.
    async fn shows_on(&self, date: &str) -> Result<Vec<RawShowRecord>, FetchError>;

    /// Per-song setlist rows for a date, all artists included.
    async fn setlist_on(&self, date: &str) -> Result<Vec<RawSongRecord>, FetchError>;

    /// Every recorded performance of a song, oldest first.
    async fn plays_of(&self, song_name: &str) -> Result<Vec<RawSongRecord>, FetchError>;
}

/// The data fetch adapter.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch a resource path and unwrap the API's response envelope.
    pub async fn fetch(&self, resource_path: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, resource_path);
        tracing::debug!(url = %url, "API request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "API returned non-success status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        unwrap_envelope(body)
    }

    /// Fetch a resource and decode its payload as a list of records.
    ///
    /// A null payload reads as an empty list; a single bare object reads as a
    /// one-element list.
    async fn fetch_records<T>(&self, resource_path: &str) -> Result<Vec<T>, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let payload = self.fetch(resource_path).await?;
        let listed = match payload {
            Value::Array(_) => payload,
            Value::Null => return Ok(Vec::new()),
            other => Value::Array(vec![other]),
        };
        serde_json::from_value(listed).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn shows_on(&self, date: &str) -> Result<Vec<RawShowRecord>, FetchError> {
        self.fetch_records(&format!("shows/showdate/{date}.json")).await
    }

    async fn setlist_on(&self, date: &str) -> Result<Vec<RawSongRecord>, FetchError> {
        self.fetch_records(&format!("setlists/showdate/{date}.json")).await
    }

    async fn plays_of(&self, song_name: &str) -> Result<Vec<RawSongRecord>, FetchError> {
        let encoded = urlencoding::encode(song_name);
        self.fetch_records(&format!(
            "setlists/songname/{encoded}.json?order_by=showdate&direction=asc"
        ))
        .await
    }
}

/// Split the `{error, error_message, data}` wrapper from a payload.
///
/// A truthy `error` field fails the fetch with the source's own message; a
/// `data` field is unwrapped; anything else passes through unchanged.
fn unwrap_envelope(body: Value) -> Result<Value, FetchError> {
    if let Value::Object(ref map) = body {
        if map.get("error").map(truthy).unwrap_or(false) {
            let message = map
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or("unspecified error")
                .to_string();
            return Err(FetchError::Remote(message));
        }
        if let Some(data) = map.get("data") {
            return Ok(data.clone());
        }
    }
    Ok(body)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_error_becomes_remote_failure() {
        let body = json!({"error": true, "error_message": "Invalid date", "data": []});
        match unwrap_envelope(body) {
            Err(FetchError::Remote(msg)) => assert_eq!(msg, "Invalid date"),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn envelope_data_is_unwrapped_when_error_is_falsy() {
        let body = json!({"error": false, "error_message": "", "data": [{"artist": "Goose"}]});
        let payload = unwrap_envelope(body).unwrap();
        assert_eq!(payload, json!([{"artist": "Goose"}]));
    }

    #[test]
    fn bare_array_passes_through() {
        let body = json!([{"artist": "Goose"}]);
        let payload = unwrap_envelope(body.clone()).unwrap();
        assert_eq!(payload, body);
    }

    #[test]
    fn object_without_envelope_fields_passes_through() {
        let body = json!({"artist": "Goose", "showdate": "2024-06-21"});
        let payload = unwrap_envelope(body.clone()).unwrap();
        assert_eq!(payload, body);
    }

    #[test]
    fn missing_error_message_gets_a_placeholder() {
        let body = json!({"error": 1});
        match unwrap_envelope(body) {
            Err(FetchError::Remote(msg)) => assert_eq!(msg, "unspecified error"),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn transient_classification() {
        assert!(FetchError::Network("refused".into()).is_transient());
        assert!(FetchError::HttpStatus(503).is_transient());
        assert!(!FetchError::Remote("bad date".into()).is_transient());
        assert!(!FetchError::Decode("not json".into()).is_transient());
    }
}
