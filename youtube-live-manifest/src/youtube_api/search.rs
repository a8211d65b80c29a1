//! YouTube Search API types.
//!
//! `search.list` is used both to find channels by free-text query and to find the
//! currently-live videos of a known channel, so a single result type covers both.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#searchListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of results that match the search criteria.
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A search result contains information about a YouTube video, channel, or playlist that
/// matches the search parameters.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifies the resource that matched the search request.
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: SearchResultSnippet,
}

impl SearchResult {
    /// The channel this result belongs to, if YouTube told us.
    ///
    /// For channel results both `snippet.channelId` and `id.channelId` carry the id; the
    /// snippet is preferred. Empty strings count as missing.
    pub fn channel_id(&self) -> Option<&str> {
        fn non_empty(id: &Option<String>) -> Option<&str> {
            id.as_deref().filter(|id| !id.is_empty())
        }
        non_empty(&self.snippet.channel_id).or_else(|| non_empty(&self.id.channel_id))
    }

    /// Whether YouTube flags this result as broadcasting right now.
    ///
    /// Results that do not say are taken to be live, since they come from an
    /// `eventType=live` search; an explicit `none` or `upcoming` is not.
    pub fn is_live(&self) -> bool {
        self.snippet
            .live_broadcast_content
            .as_deref()
            .is_none_or(|content| content == "live")
    }

    /// The matched video, if this result is a video.
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Identifies the resource that matched a search. Exactly one of the id fields is set,
/// depending on `kind`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceId {
    /// The type of the API resource, e.g. `youtube#video` or `youtube#channel`.
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Basic details about a search result.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#snippet>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResultSnippet {
    /// The ID of the channel that published the resource.
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "channelTitle", skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    /// `live`, `upcoming` or `none`.
    #[serde(rename = "liveBroadcastContent", skip_serializing_if = "Option::is_none")]
    pub live_broadcast_content: Option<String>,
}
