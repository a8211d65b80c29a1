//! Classification of raw channel-list lines into typed channel references.
//!
//! A line can name a channel in many ways: a channel URL in any of its historical shapes, a
//! bare `@handle`, a raw `UC…` channel id, or just the channel's name. [`ChannelReference::classify`]
//! decides which one a line is, without talking to the network.

use percent_encoding::percent_decode_str;
use url::Url;

/// Host substring that marks a URL as pointing at YouTube.
const PLATFORM_DOMAIN: &str = "youtube.com";

/// Every YouTube channel id starts with this.
const CHANNEL_ID_PREFIX: &str = "UC";

/// A channel reference as written by the user, before it is resolved to a channel id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReference {
    /// A raw channel id, e.g. `UCSJ4gkVC6NrvII8umztf0Ow`.
    ChannelId(String),
    /// A legacy username, from `youtube.com/user/<name>`.
    UserName(String),
    /// A custom URL name, from `youtube.com/c/<name>`.
    CustomName(String),
    /// A handle, always including its leading `@`.
    Handle(String),
    /// Anything else; resolved by searching for it.
    FreeText(String),
}

impl ChannelReference {
    /// Classifies one line of the channel list.
    ///
    /// Returns `None` only for blank input. The first matching rule wins:
    ///
    /// 1. a line starting with `@` is a handle;
    /// 2. a YouTube URL is classified by its path (`/@handle`, `/channel/<id>`,
    ///    `/user/<name>`, `/c/<name>`, or a single segment);
    /// 3. a line starting with `UC` is a channel id;
    /// 4. a scheme-less `youtube.com/@handle` is a handle;
    /// 5. anything else is free text.
    ///
    /// Lines that look like URLs but fail to parse simply fall through to the later rules.
    pub fn classify(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let reference = if line.starts_with('@') {
            Self::Handle(line.to_string())
        } else if let Some(reference) = Self::from_url(line) {
            reference
        } else if line.starts_with(CHANNEL_ID_PREFIX) {
            Self::ChannelId(line.to_string())
        } else if let Some(handle) = Self::from_schemeless_url(line) {
            Self::Handle(handle)
        } else {
            Self::FreeText(line.to_string())
        };
        Some(reference)
    }

    /// Short name of the reference kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChannelId(_) => "channel_id",
            Self::UserName(_) => "user_name",
            Self::CustomName(_) => "custom_name",
            Self::Handle(_) => "handle",
            Self::FreeText(_) => "free_text",
        }
    }

    /// The string carried by the reference.
    pub fn token(&self) -> &str {
        match self {
            Self::ChannelId(token)
            | Self::UserName(token)
            | Self::CustomName(token)
            | Self::Handle(token)
            | Self::FreeText(token) => token,
        }
    }

    fn from_url(line: &str) -> Option<Self> {
        let url = Url::parse(line).ok()?;
        if !url
            .host_str()
            .is_some_and(|host| host.contains(PLATFORM_DOMAIN))
        {
            return None;
        }

        // `Url` percent-encodes non-ASCII path characters; handles and names may well be
        // non-ASCII, and they are later used as search queries.
        let segments: Vec<String> = url
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
            .collect();

        if url.path().starts_with("/@") {
            return segments.first().map(|handle| Self::Handle(with_at(handle)));
        }

        let after = |marker: &str| {
            segments
                .iter()
                .position(|segment| segment == marker)
                .and_then(|i| segments.get(i + 1))
                .cloned()
        };
        if let Some(id) = after("channel") {
            return Some(Self::ChannelId(id));
        }
        if let Some(name) = after("user") {
            return Some(Self::UserName(name));
        }
        if let Some(name) = after("c") {
            return Some(Self::CustomName(name));
        }

        // youtube.com/SomeName
        match segments.as_slice() {
            [only] if only.starts_with('@') => Some(Self::Handle(only.clone())),
            [only] => Some(Self::FreeText(only.clone())),
            _ => None,
        }
    }

    /// Handles `youtube.com/@handle` and `www.youtube.com/@handle`, which have no scheme and
    /// so do not parse as URLs.
    fn from_schemeless_url(line: &str) -> Option<String> {
        if !(line.starts_with("youtube.com/@") || line.starts_with("www.youtube.com/@")) {
            return None;
        }
        line.rsplit('/')
            .next()
            .filter(|token| token.starts_with('@'))
            .map(str::to_string)
    }
}

fn with_at(handle: &str) -> String {
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{handle}")
    }
}
