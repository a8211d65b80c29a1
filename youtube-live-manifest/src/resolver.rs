//! Resolution of channel references to YouTube channel ids.
//!
//! The public API has no endpoint that maps every form of handle or custom name to a channel
//! id, so most references are resolved by searching and trusting the top hit. That can pick
//! the wrong channel for ambiguous names; no further disambiguation is attempted.

use crate::reference::ChannelReference;
use crate::youtube_api::YouTubeApi;
use eyre::Context;
use tracing::instrument;

/// Results requested per handle search.
const HANDLE_SEARCH_RESULTS: u32 = 3;

/// Results requested per custom-name or free-text search.
const NAME_SEARCH_RESULTS: u32 = 1;

/// Turns [`ChannelReference`]s into channel ids using the YouTube API.
#[derive(Debug, Clone)]
pub struct ChannelResolver<A> {
    api: A,
}

impl<A: YouTubeApi> ChannelResolver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolves `reference` to a channel id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(id))` - the channel id, as given or as returned by the API
    /// * `Ok(None)` - the API answered, but nothing matched
    /// * `Err(_)` - an API call failed; no further lookups were attempted
    ///
    /// Raw channel ids are returned as-is without any API call. Handles are searched for
    /// first as `@handle` and then, only if that finds nothing, as the bare name.
    #[instrument(skip(self), fields(kind = reference.kind()))]
    pub async fn resolve(&self, reference: &ChannelReference) -> eyre::Result<Option<String>> {
        match reference {
            ChannelReference::ChannelId(id) => Ok(Some(id.clone())),
            ChannelReference::UserName(name) => {
                let channels = self
                    .api
                    .channels_by_username(name)
                    .await
                    .with_context(|| format!("look up channel for username {name}"))?;
                Ok(channels
                    .items
                    .into_iter()
                    .map(|channel| channel.id)
                    .find(|id| !id.is_empty()))
            }
            ChannelReference::Handle(handle) => {
                let bare = handle.trim_start_matches('@');
                if bare.is_empty() {
                    return Ok(None);
                }
                if let Some(id) = self
                    .first_channel_hit(&format!("@{bare}"), HANDLE_SEARCH_RESULTS)
                    .await?
                {
                    return Ok(Some(id));
                }
                tracing::debug!(handle = bare, "no hit for @handle, retrying without @");
                self.first_channel_hit(bare, HANDLE_SEARCH_RESULTS).await
            }
            ChannelReference::CustomName(query) | ChannelReference::FreeText(query) => {
                self.first_channel_hit(query, NAME_SEARCH_RESULTS).await
            }
        }
    }

    async fn first_channel_hit(
        &self,
        query: &str,
        max_results: u32,
    ) -> eyre::Result<Option<String>> {
        let results = self
            .api
            .search_channels(query, max_results)
            .await
            .with_context(|| format!("search channels for {query:?}"))?;
        let Some(hit) = results.items.iter().find(|item| item.channel_id().is_some()) else {
            return Ok(None);
        };
        // the top hit is trusted as-is, so record what it actually was
        tracing::debug!(
            query,
            channel_id = hit.channel_id(),
            channel_title = hit.snippet.channel_title.as_deref(),
            "taking top search hit"
        );
        Ok(hit.channel_id().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::fake::{Call, FakeApi};
    use pretty_assertions::assert_eq;

    fn search(query: &str, max_results: u32) -> Call {
        Call::SearchChannels {
            query: query.to_string(),
            max_results,
        }
    }

    #[tokio::test]
    async fn channel_id_needs_no_lookup() {
        let api = FakeApi::new();
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::ChannelId("UCabc".into()))
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("UCabc"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn user_name_uses_username_lookup() {
        let api = FakeApi::new().with_username("someone", "UCsomeone");
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::UserName("someone".into()))
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("UCsomeone"));
        assert_eq!(
            api.calls(),
            vec![Call::ChannelsByUsername("someone".into())]
        );
    }

    #[tokio::test]
    async fn unknown_user_name_is_not_found() {
        let api = FakeApi::new();
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::UserName("nobody".into()))
            .await
            .unwrap();

        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn handle_hit_skips_fallback() {
        let api = FakeApi::new().with_channel_search("@examplechan", &["UCexample", "UCother"]);
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::Handle("@examplechan".into()))
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("UCexample"));
        assert_eq!(api.calls(), vec![search("@examplechan", 3)]);
    }

    #[tokio::test]
    async fn handle_falls_back_to_bare_name() {
        let api = FakeApi::new().with_channel_search("examplechan", &["UCexample"]);
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::Handle("@examplechan".into()))
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("UCexample"));
        assert_eq!(
            api.calls(),
            vec![search("@examplechan", 3), search("examplechan", 3)]
        );
    }

    #[tokio::test]
    async fn handle_without_hits_is_not_found() {
        let api = FakeApi::new();
        let resolver = ChannelResolver::new(&api);

        let id = resolver
            .resolve(&ChannelReference::Handle("@ghost".into()))
            .await
            .unwrap();

        assert_eq!(id, None);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn failed_handle_search_is_not_retried() {
        let api = FakeApi::new()
            .failing_on("@flaky")
            .with_channel_search("flaky", &["UCflaky"]);
        let resolver = ChannelResolver::new(&api);

        let err = resolver
            .resolve(&ChannelReference::Handle("@flaky".into()))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("500"));
        assert_eq!(api.calls(), vec![search("@flaky", 3)]);
    }

    #[tokio::test]
    async fn names_take_the_top_search_hit() {
        let api = FakeApi::new()
            .with_channel_search("SomeBrand", &["UCbrand"])
            .with_channel_search("Lofi Girl", &["UClofi"]);
        let resolver = ChannelResolver::new(&api);

        let custom = resolver
            .resolve(&ChannelReference::CustomName("SomeBrand".into()))
            .await
            .unwrap();
        let free = resolver
            .resolve(&ChannelReference::FreeText("Lofi Girl".into()))
            .await
            .unwrap();

        assert_eq!(custom.as_deref(), Some("UCbrand"));
        assert_eq!(free.as_deref(), Some("UClofi"));
        assert_eq!(
            api.calls(),
            vec![search("SomeBrand", 1), search("Lofi Girl", 1)]
        );
    }
}
