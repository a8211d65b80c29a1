//! The batch run: read the channel list, find live videos, write the manifest.

use crate::config::Config;
use crate::error::RunError;
use crate::live::{ChannelLive, LiveVideoFinder, ResolvedChannel};
use crate::manifest::Manifest;
use crate::reference::ChannelReference;
use crate::resolver::ChannelResolver;
use crate::youtube_api::{YouTubeApi, YouTubeClient};
use std::time::Duration;

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Channel-list lines processed, not counting blanks and comments.
    pub lines: usize,
    /// Lines that resolved to a channel id.
    pub resolved: usize,
    /// Entries written to the manifest.
    pub live_videos: usize,
}

/// The meaningful lines of a channel list: trimmed, without blank lines or `#` comments.
pub fn parse_channel_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Resolves every line and collects the live videos of the resolved channels.
///
/// Lines are processed strictly one after another. A line that cannot be resolved, or whose
/// channel cannot be queried, is logged and contributes nothing; it never aborts the run.
pub async fn collect_live<'a, A: YouTubeApi>(
    api: &A,
    lines: impl IntoIterator<Item = &'a str>,
    video_delay: Duration,
    channel_delay: Duration,
) -> (Manifest, RunSummary) {
    let resolver = ChannelResolver::new(api);
    let finder = LiveVideoFinder::new(api, video_delay);
    let mut manifest = Manifest::new();
    let mut summary = RunSummary::default();

    for line in lines {
        let Some(reference) = ChannelReference::classify(line) else {
            continue;
        };
        summary.lines += 1;
        tracing::info!(
            line,
            kind = reference.kind(),
            token = reference.token(),
            "resolving channel"
        );

        let id = match resolver.resolve(&reference).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::info!(line, "channel id not found, skipping");
                continue;
            }
            Err(e) => {
                tracing::warn!(line, "failed to resolve channel, skipping: {e:#}");
                continue;
            }
        };
        summary.resolved += 1;
        let channel = ResolvedChannel {
            id,
            requested_name: line.to_string(),
        };

        match finder.find(&channel.id).await {
            Ok(videos) if videos.is_empty() => {
                tracing::debug!(channel_id = channel.id, "channel is not live");
            }
            Ok(videos) => {
                tracing::info!(
                    channel_id = channel.id,
                    requested = channel.requested_name,
                    live_videos = videos.len(),
                    "channel is live"
                );
                summary.live_videos += videos.len();
                manifest.add_channel(&ChannelLive { channel, videos });
            }
            Err(e) => {
                tracing::warn!(
                    channel_id = channel.id,
                    "failed to look up live videos, skipping: {e:#}"
                );
            }
        }

        tokio::time::sleep(channel_delay).await;
    }

    (manifest, summary)
}

/// Runs the whole batch job described by `config`.
///
/// Fails before any network access if the channel list is missing. The manifest is only
/// written once every line has been processed; on error no output file is created.
pub async fn run(config: &Config) -> Result<RunSummary, RunError> {
    let input_path = &config.input_path;
    match tokio::fs::try_exists(input_path).await {
        Ok(true) => {}
        Ok(false) => return Err(RunError::MissingInputFile(input_path.clone())),
        Err(source) => {
            return Err(RunError::ReadInput {
                path: input_path.clone(),
                source,
            });
        }
    }
    let text = tokio::fs::read_to_string(input_path)
        .await
        .map_err(|source| RunError::ReadInput {
            path: input_path.clone(),
            source,
        })?;

    let client = YouTubeClient::from_config(config).map_err(RunError::HttpClient)?;
    let (manifest, summary) = collect_live(
        &client,
        parse_channel_list(&text),
        config.video_delay,
        config.channel_delay,
    )
    .await;

    let xml = manifest.to_xml().map_err(RunError::Render)?;
    tokio::fs::write(&config.output_path, xml)
        .await
        .map_err(|source| RunError::WriteOutput {
            path: config.output_path.clone(),
            source,
        })?;
    tracing::info!(
        path = %config.output_path.display(),
        entries = manifest.len(),
        "wrote manifest"
    );

    Ok(summary)
}
