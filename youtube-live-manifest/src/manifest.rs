//! The `media.xml` manifest of live videos.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <mediaList>
//!   <media>
//!     <title>lofi hip hop radio</title>
//!     <thumb>https://img.youtube.com/vi/jfKfPfyJRdk/0.jpg</thumb>
//!     <type>youtube</type>
//!     <src>jfKfPfyJRdk</src>
//!   </media>
//! </mediaList>
//! ```

use crate::live::{ChannelLive, LiveVideo};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::io;
use thiserror::Error;

/// Value of every `<type>` element.
pub const MEDIA_TYPE: &str = "youtube";

/// Thumbnail URL YouTube serves for a video.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/0.jpg")
}

/// One `<media>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub title: String,
    pub thumb: String,
    /// Contents of `<type>`.
    pub kind: String,
    pub src: String,
}

impl From<&LiveVideo> for Media {
    fn from(video: &LiveVideo) -> Self {
        Self {
            title: video.title.clone(),
            thumb: thumbnail_url(&video.video_id),
            kind: MEDIA_TYPE.to_string(),
            src: video.video_id.clone(),
        }
    }
}

/// Why a document could not be read back as a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("malformed manifest XML")]
    Xml(#[from] quick_xml::Error),

    #[error("<media> entry {index} has no <{field}>")]
    MissingField { index: usize, field: &'static str },
}

#[derive(Debug, Clone, Copy)]
enum Leaf {
    Title,
    Thumb,
    Type,
    Src,
}

impl Leaf {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"thumb" => Some(Self::Thumb),
            b"type" => Some(Self::Type),
            b"src" => Some(Self::Src),
            _ => None,
        }
    }
}

/// Leaves seen so far inside one `<media>`.
#[derive(Debug, Default)]
struct PartialMedia {
    title: Option<String>,
    thumb: Option<String>,
    kind: Option<String>,
    src: Option<String>,
}

impl PartialMedia {
    fn set(&mut self, leaf: Leaf, text: String) {
        let slot = match leaf {
            Leaf::Title => &mut self.title,
            Leaf::Thumb => &mut self.thumb,
            Leaf::Type => &mut self.kind,
            Leaf::Src => &mut self.src,
        };
        *slot = Some(text);
    }

    fn finish(self, index: usize) -> Result<Media, ManifestError> {
        let missing = |field| ManifestError::MissingField { index, field };
        Ok(Media {
            title: self.title.unwrap_or_default(),
            thumb: self.thumb.ok_or_else(|| missing("thumb"))?,
            kind: self.kind.ok_or_else(|| missing("type"))?,
            src: self.src.ok_or_else(|| missing("src"))?,
        })
    }
}

/// Whether XML 1.0 allows `c` in character data.
///
/// Surrogates cannot occur in a `char`, so only the C0 controls and the two noncharacters
/// at the top of the BMP are excluded.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || c >= '\u{10000}'
}

/// `text` without the characters XML 1.0 cannot represent.
fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Ordered list of live videos, rendered as a `<mediaList>` document.
///
/// Entries keep the order they were added in; the same video reported by two channels
/// appears twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    media: Vec<Media>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry per live video of `live`.
    pub fn add_channel(&mut self, live: &ChannelLive) {
        self.media.extend(live.videos.iter().map(Media::from));
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Renders the manifest as a UTF-8 XML document indented by two spaces.
    ///
    /// Characters that XML 1.0 does not allow (control characters other than tab, LF and CR)
    /// are dropped from the text, so the output is always well-formed.
    pub fn to_xml(&self) -> io::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer
            .create_element("mediaList")
            .write_inner_content(|writer| -> io::Result<()> {
                for media in &self.media {
                    writer
                        .create_element("media")
                        .write_inner_content(|writer| -> io::Result<()> {
                            writer
                                .create_element("title")
                                .write_text_content(BytesText::new(&xml_text(&media.title)))?;
                            writer
                                .create_element("thumb")
                                .write_text_content(BytesText::new(&xml_text(&media.thumb)))?;
                            writer
                                .create_element("type")
                                .write_text_content(BytesText::new(&xml_text(&media.kind)))?;
                            writer
                                .create_element("src")
                                .write_text_content(BytesText::new(&xml_text(&media.src)))?;
                            Ok(())
                        })?;
                }
                Ok(())
            })?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Parses a document produced by [`Self::to_xml`].
    ///
    /// Leaf text is kept exactly, including leading and trailing whitespace; only the
    /// indentation between elements is ignored. A missing `<title>` reads as empty, the
    /// other three leaves are required.
    pub fn from_xml(xml: &str) -> Result<Self, ManifestError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut media = Vec::new();
        let mut entry: Option<PartialMedia> = None;
        let mut leaf: Option<(Leaf, String)> = None;
        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"media" => entry = Some(PartialMedia::default()),
                    name if entry.is_some() => {
                        leaf = Leaf::from_name(name).map(|field| (field, String::new()));
                    }
                    _ => {}
                },
                Event::Empty(e) => match (e.name().as_ref(), entry.as_mut()) {
                    (b"media", None) => {
                        media.push(PartialMedia::default().finish(media.len())?);
                    }
                    (name, Some(fields)) => {
                        if let Some(field) = Leaf::from_name(name) {
                            fields.set(field, String::new());
                        }
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if let Some((_, content)) = leaf.as_mut() {
                        content.push_str(&text.unescape().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"media" {
                        if let Some(fields) = entry.take() {
                            media.push(fields.finish(media.len())?);
                        }
                    } else if let Some((field, content)) = leaf.take() {
                        if let Some(fields) = entry.as_mut() {
                            fields.set(field, content);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { media })
    }
}
