//! Scripted stand-in for the YouTube API used by unit tests.
//!
//! Responses are configured up front; every call is recorded so tests can assert which
//! requests were (and were not) issued.

use crate::youtube_api::{
    Channel, ChannelListResponse, ResourceId, SearchListResponse, SearchResult,
    SearchResultSnippet, YouTubeApi,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One request made against [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ChannelsByUsername(String),
    SearchChannels { query: String, max_results: u32 },
    SearchLiveVideos { channel_id: String, max_results: u32 },
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    usernames: HashMap<String, Vec<String>>,
    channel_searches: HashMap<String, Vec<String>>,
    live_videos: HashMap<String, Vec<SearchResult>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_username(mut self, username: &str, channel_id: &str) -> Self {
        self.usernames
            .entry(username.to_string())
            .or_default()
            .push(channel_id.to_string());
        self
    }

    pub(crate) fn with_channel_search(mut self, query: &str, channel_ids: &[&str]) -> Self {
        self.channel_searches.insert(
            query.to_string(),
            channel_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_live_videos(self, channel_id: &str, videos: &[(&str, &str)]) -> Self {
        let results = videos
            .iter()
            .map(|(video_id, title)| live_result(channel_id, Some(*video_id), title, "live"))
            .collect();
        self.with_live_results(channel_id, results)
    }

    /// Serves `results` verbatim for the live search of `channel_id`.
    ///
    /// Unlike the channel search, live searches ignore `max_results`, so callers have to cap
    /// what they use themselves.
    pub(crate) fn with_live_results(
        mut self,
        channel_id: &str,
        results: Vec<SearchResult>,
    ) -> Self {
        self.live_videos.insert(channel_id.to_string(), results);
        self
    }

    /// Makes any request whose username, query or channel id equals `token` fail.
    pub(crate) fn failing_on(mut self, token: &str) -> Self {
        self.failing.insert(token.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, token: &str) -> eyre::Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(token) {
            eyre::bail!("YouTube API request failed with status 500 Internal Server Error");
        }
        Ok(())
    }
}

/// A live-search result as YouTube returns it.
pub(crate) fn live_result(
    channel_id: &str,
    video_id: Option<&str>,
    title: &str,
    live_broadcast_content: &str,
) -> SearchResult {
    SearchResult {
        id: ResourceId {
            kind: "youtube#video".to_string(),
            video_id: video_id.map(str::to_string),
            channel_id: None,
        },
        snippet: SearchResultSnippet {
            channel_id: Some(channel_id.to_string()),
            title: title.to_string(),
            live_broadcast_content: Some(live_broadcast_content.to_string()),
            ..Default::default()
        },
    }
}

fn search_response(items: impl Iterator<Item = SearchResult>) -> SearchListResponse {
    SearchListResponse {
        kind: "youtube#searchListResponse".to_string(),
        items: items.collect(),
        ..Default::default()
    }
}

impl YouTubeApi for FakeApi {
    async fn channels_by_username(&self, username: &str) -> eyre::Result<ChannelListResponse> {
        self.record(Call::ChannelsByUsername(username.to_string()), username)?;
        let items = self
            .usernames
            .get(username)
            .into_iter()
            .flatten()
            .map(|id| Channel { id: id.clone() })
            .collect();
        Ok(ChannelListResponse {
            kind: "youtube#channelListResponse".to_string(),
            items,
            ..Default::default()
        })
    }

    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        self.record(
            Call::SearchChannels {
                query: query.to_string(),
                max_results,
            },
            query,
        )?;
        let items = self
            .channel_searches
            .get(query)
            .into_iter()
            .flatten()
            .take(max_results as usize)
            .map(|id| SearchResult {
                id: ResourceId {
                    kind: "youtube#channel".to_string(),
                    channel_id: Some(id.clone()),
                    video_id: None,
                },
                snippet: SearchResultSnippet {
                    channel_id: Some(id.clone()),
                    ..Default::default()
                },
            });
        Ok(search_response(items))
    }

    async fn search_live_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> eyre::Result<SearchListResponse> {
        self.record(
            Call::SearchLiveVideos {
                channel_id: channel_id.to_string(),
                max_results,
            },
            channel_id,
        )?;
        let items = self.live_videos.get(channel_id).into_iter().flatten().cloned();
        Ok(search_response(items))
    }
}
