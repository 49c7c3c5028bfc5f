//! Runtime configuration: environment variables, then a TOML file, then
//! compiled defaults, resolved per field.

use crate::setlist::ActFilter;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://elgoose.net/api/v2";
const DEFAULT_ACT_NAME: &str = "Goose";
const DEFAULT_ACT_ARTIST_ID: i64 = 1;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// On-disk TOML shape; every field optional.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    api_base_url: Option<String>,
    act_name: Option<String>,
    act_artist_id: Option<i64>,
    http_timeout_secs: Option<u64>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub act: ActFilter,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            act: ActFilter::new(DEFAULT_ACT_NAME, Some(DEFAULT_ACT_ARTIST_ID)),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration with env > TOML > default priority per field.
    pub fn load() -> Self {
        let toml = load_toml_config().unwrap_or_default();
        let defaults = Config::default();

        let api_base_url = std::env::var("GAGGLE_API_BASE_URL")
            .ok()
            .or(toml.api_base_url)
            .unwrap_or(defaults.api_base_url);

        let act_name = std::env::var("GAGGLE_ACT_NAME")
            .ok()
            .or(toml.act_name)
            .unwrap_or_else(|| DEFAULT_ACT_NAME.to_string());

        let act_artist_id = std::env::var("GAGGLE_ACT_ARTIST_ID")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .or(toml.act_artist_id)
            .or(Some(DEFAULT_ACT_ARTIST_ID));

        let http_timeout_secs = std::env::var("GAGGLE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .or(toml.http_timeout_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            api_base_url,
            act: ActFilter::new(act_name, act_artist_id),
            http_timeout: Duration::from_secs(http_timeout_secs),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gaggle").join("config.toml"))
}

fn load_toml_config() -> Option<TomlConfig> {
    let path = config_file_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Ignoring malformed config file");
            None
        }
    }
}
