//! Finds out which YouTube channels in a list are live right now and writes a
//! `media.xml` manifest of their live videos.
//!
//! The job is a straight pipeline, run once per line of the channel list:
//!
//! 1. [`ChannelReference::classify`] works out what kind of reference the line is
//!    (URL, `@handle`, channel id, or just a name).
//! 2. [`ChannelResolver`] turns it into a channel id, searching the API where needed.
//! 3. [`LiveVideoFinder`] lists the channel's live broadcasts.
//! 4. [`Manifest`] collects them and renders the XML.
//!
//! [`run`] wires these together with the real [`YouTubeClient`] according to a [`Config`].

pub mod config;
pub mod error;
pub mod live;
pub mod manifest;
pub mod pipeline;
pub mod reference;
pub mod resolver;
pub mod youtube_api;

pub use config::Config;
pub use error::RunError;
pub use live::{ChannelLive, LiveVideo, LiveVideoFinder, ResolvedChannel};
pub use manifest::{Manifest, ManifestError, Media};
pub use pipeline::{RunSummary, collect_live, parse_channel_list, run};
pub use reference::ChannelReference;
pub use resolver::ChannelResolver;
pub use youtube_api::{YouTubeApi, YouTubeClient};
