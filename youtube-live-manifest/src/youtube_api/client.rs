//! HTTP client for the YouTube Data API, authenticated with an API key.

use crate::config::Config;
use crate::youtube_api::{ChannelListResponse, SearchListResponse, YouTubeApi};
use eyre::Context;
use std::time::Duration;
use tracing::instrument;

/// Default base address of the YouTube Data API v3.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the public, read-only parts of the YouTube Data API v3.
///
/// Every request carries the API key as the `key` query parameter and is subject to the
/// same fixed timeout. Requests are never retried.
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    /// Base address without a trailing slash, e.g. [`YOUTUBE_API_BASE`].
    api_base: String,
    client: reqwest::Client,
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a client talking to `api_base` with the given key and per-request timeout.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        let api_base = api_base.into().trim_end_matches('/').to_string();

        Ok(Self {
            api_key: api_key.into(),
            api_base,
            client,
        })
    }

    /// Creates a client from the credential, base address and timeout in `config`.
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Self::new(
            config.api_key.clone(),
            config.api_base.clone(),
            config.request_timeout,
        )
    }

    /// Makes a GET request to `{api_base}/{resource}` with common error handling.
    ///
    /// The API key is appended to `query_params`. Non-2xx responses are turned into errors
    /// carrying the status code and the response body, which for the YouTube API holds the
    /// structured reason (e.g. `quotaExceeded`).
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for method-specific JSON parsing.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get(
        &self,
        resource: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = format!("{}/{}", self.api_base, resource);

        let response = self
            .client
            .get(&url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            // the request URL contains the key
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send GET request to YouTube API: {url}"))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API request to {} failed with status {}: {}",
                resource,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }
}

impl YouTubeApi for YouTubeClient {
    /// Looks up the channels owned by a legacy YouTube username.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn channels_by_username(&self, username: &str) -> eyre::Result<ChannelListResponse> {
        let query_params = [("part", "id"), ("forUsername", username)];

        let response = self.get("channels", &query_params).await?;
        let channels: ChannelListResponse = response
            .json()
            .await
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            total_results = channels.page_info.total_results,
            returned_items = channels.items.len(),
            "fetched channels by username"
        );

        Ok(channels)
    }

    /// Searches channels by free text.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let query_params = [
            ("part", "snippet"),
            ("q", query),
            ("type", "channel"),
            ("maxResults", max_results_string.as_str()),
        ];

        let response = self.get("search", &query_params).await?;
        let results: SearchListResponse = response
            .json()
            .await
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            total_results = results.page_info.total_results,
            returned_items = results.items.len(),
            "searched channels"
        );

        Ok(results)
    }

    /// Lists the videos of a channel that are currently broadcasting live.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search_live_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let query_params = [
            ("part", "snippet"),
            ("channelId", channel_id),
            ("type", "video"),
            ("eventType", "live"),
            ("maxResults", max_results_string.as_str()),
        ];

        let response = self.get("search", &query_params).await?;
        let results: SearchListResponse = response
            .json()
            .await
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            channel_id,
            returned_items = results.items.len(),
            "searched live videos"
        );

        Ok(results)
    }
}
