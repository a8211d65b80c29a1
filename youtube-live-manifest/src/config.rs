//! Run configuration.
//!
//! Everything the pipeline needs from its environment is collected into a [`Config`] up front
//! and passed down explicitly, so nothing reads the process environment after start-up.

use crate::error::RunError;
use crate::youtube_api::YOUTUBE_API_BASE;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Environment variable that overrides [`YOUTUBE_API_BASE`], e.g. to point at a mock server.
pub const API_BASE_VAR: &str = "YOUTUBE_API_BASE";

pub const DEFAULT_INPUT_PATH: &str = "channels.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "media.xml";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const VIDEO_DELAY: Duration = Duration::from_millis(50);
const CHANNEL_DELAY: Duration = Duration::from_millis(120);

#[derive(Clone)]
pub struct Config {
    /// Key sent with every API request.
    pub api_key: String,
    /// Base address of the YouTube Data API, without a trailing slash.
    pub api_base: String,
    /// Channel list, one reference per line.
    pub input_path: PathBuf,
    /// Where the manifest is written.
    pub output_path: PathBuf,
    /// Deadline applied to every API request.
    pub request_timeout: Duration,
    /// Courtesy pause after each live video found.
    pub video_delay: Duration,
    /// Courtesy pause after each resolved channel.
    pub channel_delay: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("request_timeout", &self.request_timeout)
            .field("video_delay", &self.video_delay)
            .field("channel_delay", &self.channel_delay)
            .finish()
    }
}

impl Config {
    /// Default configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: YOUTUBE_API_BASE.to_string(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            request_timeout: REQUEST_TIMEOUT,
            video_delay: VIDEO_DELAY,
            channel_delay: CHANNEL_DELAY,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, RunError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Fails with [`RunError::MissingCredential`] if the API key is unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(RunError::MissingCredential)?;

        let mut config = Self::new(api_key);
        if let Some(base) = lookup(API_BASE_VAR).filter(|base| !base.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    /// Zeroes the courtesy delays.
    pub fn without_delays(mut self) -> Self {
        self.video_delay = Duration::ZERO;
        self.channel_delay = Duration::ZERO;
        self
    }
}
