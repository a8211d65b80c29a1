//! Finding the live broadcasts of a resolved channel.

use crate::youtube_api::YouTubeApi;
use eyre::Context;
use std::time::Duration;
use tracing::instrument;

/// Most live videos reported per channel.
pub const MAX_LIVE_VIDEOS: u32 = 5;

/// A channel reference that was successfully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    /// Channel id, either given verbatim by the user or returned by the API.
    pub id: String,
    /// The channel-list line this channel was resolved from.
    pub requested_name: String,
}

/// A video that is currently broadcasting live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveVideo {
    pub video_id: String,
    /// May be empty.
    pub title: String,
}

/// The live videos found for one channel, in API order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLive {
    pub channel: ResolvedChannel,
    pub videos: Vec<LiveVideo>,
}

/// Looks up the live broadcasts of channels.
#[derive(Debug, Clone)]
pub struct LiveVideoFinder<A> {
    api: A,
    /// Courtesy pause after each returned item.
    delay: Duration,
}

impl<A: YouTubeApi> LiveVideoFinder<A> {
    pub fn new(api: A, delay: Duration) -> Self {
        Self { api, delay }
    }

    /// Returns up to [`MAX_LIVE_VIDEOS`] videos of `channel_id` that are live right now.
    ///
    /// Only the first [`MAX_LIVE_VIDEOS`] results are considered, however many the API
    /// returns. Results without a video id, and results YouTube flags as not live (the
    /// search index can lag behind a broadcast ending), are skipped.
    #[instrument(skip(self))]
    pub async fn find(&self, channel_id: &str) -> eyre::Result<Vec<LiveVideo>> {
        let results = self
            .api
            .search_live_videos(channel_id, MAX_LIVE_VIDEOS)
            .await
            .with_context(|| format!("search live videos of channel {channel_id}"))?;

        let mut videos = Vec::with_capacity(results.items.len());
        for item in results.items.into_iter().take(MAX_LIVE_VIDEOS as usize) {
            match item.video_id().map(str::to_string) {
                None => {
                    tracing::debug!(kind = %item.id.kind, "skipping search result without video id");
                }
                Some(video_id) if !item.is_live() => {
                    tracing::debug!(
                        video_id,
                        content = item.snippet.live_broadcast_content.as_deref(),
                        "skipping search result that is no longer live"
                    );
                }
                Some(video_id) => videos.push(LiveVideo {
                    video_id,
                    title: item.snippet.title,
                }),
            }
            tokio::time::sleep(self.delay).await;
        }

        Ok(videos)
    }
}
