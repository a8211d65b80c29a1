//! Read-only YouTube Data API v3 client.
//!
//! Only two endpoints are needed to find out whether a channel is live:
//!
//! - `channels.list` with `forUsername`, to turn a legacy username into a channel id.
//! - `search.list`, both to look channels up by free text and to list the videos of a
//!   channel with `eventType=live`.
//!
//! All calls authenticate with a plain API key (no OAuth), since only public data is read.
//!
//! The rest of the crate talks to the API through the [`YouTubeApi`] trait so that tests
//! can substitute a fake that records the calls made against it.

pub mod channels;
pub mod client;
pub mod search;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use channels::{Channel, ChannelListResponse};
pub use client::{YOUTUBE_API_BASE, YouTubeClient};
pub use search::{ResourceId, SearchListResponse, SearchResult, SearchResultSnippet};
pub use types::PageInfo;

/// The API operations the live-channel pipeline depends on.
///
/// Every method returns the failure reason as an [`eyre::Report`] rather than logging it, so
/// callers decide uniformly how to report and skip.
#[allow(async_fn_in_trait)]
pub trait YouTubeApi {
    /// Looks up channels by legacy username (`channels.list?forUsername=`).
    async fn channels_by_username(&self, username: &str) -> eyre::Result<ChannelListResponse>;

    /// Searches for channels matching `query` (`search.list?type=channel`).
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse>;

    /// Lists videos of `channel_id` that are live right now
    /// (`search.list?type=video&eventType=live`).
    async fn search_live_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse>;
}

impl<T: YouTubeApi> YouTubeApi for &T {
    async fn channels_by_username(&self, username: &str) -> eyre::Result<ChannelListResponse> {
        (**self).channels_by_username(username).await
    }

    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        (**self).search_channels(query, max_results).await
    }

    async fn search_live_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        (**self).search_live_videos(channel_id, max_results).await
    }
}
