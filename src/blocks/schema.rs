//! Content record schema.
//!
//! A [`ContentRecord`] serializes as `{"type": <TypeName>, "content": {...}}`.
//! Payloads are plain owned data; no syntax tree or collaborator handle ever
//! ends up in one.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::BlockKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum ContentRecord {
    Heading(HeadingContent),
    Paragraph(HtmlContent),
    Image(ImageContent),
    Gallery(GalleryContent),
    List(ListContent),
    Quote(QuoteContent),
    Cover(CoverContent),
    Audio(AudioContent),
    File(FileContent),
    Video(VideoContent),
    Preformatted(PreformattedContent),
    Code(CodeContent),
    #[serde(rename = "HTML")]
    Html(HtmlContent),
    #[serde(rename = "PullQuote")]
    Pullquote(QuoteContent),
    Table(TableContent),
    Verse(HtmlContent),
    Button(ButtonContent),
    Columns(ColumnsContent),
    MediaText(MediaTextContent),
    More(EmptyContent),
    #[serde(rename = "NextPage")]
    Nextpage(EmptyContent),
    Separator(EmptyContent),
    Spacer(SpacerContent),
}

impl ContentRecord {
    /// Block kind this record was extracted from
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentRecord::Heading(_) => BlockKind::Heading,
            ContentRecord::Paragraph(_) => BlockKind::Paragraph,
            ContentRecord::Image(_) => BlockKind::Image,
            ContentRecord::Gallery(_) => BlockKind::Gallery,
            ContentRecord::List(_) => BlockKind::List,
            ContentRecord::Quote(_) => BlockKind::Quote,
            ContentRecord::Cover(_) => BlockKind::Cover,
            ContentRecord::Audio(_) => BlockKind::Audio,
            ContentRecord::File(_) => BlockKind::File,
            ContentRecord::Video(_) => BlockKind::Video,
            ContentRecord::Preformatted(_) => BlockKind::Preformatted,
            ContentRecord::Code(_) => BlockKind::Code,
            ContentRecord::Html(_) => BlockKind::Html,
            ContentRecord::Pullquote(_) => BlockKind::Pullquote,
            ContentRecord::Table(_) => BlockKind::Table,
            ContentRecord::Verse(_) => BlockKind::Verse,
            ContentRecord::Button(_) => BlockKind::Button,
            ContentRecord::Columns(_) => BlockKind::Columns,
            ContentRecord::MediaText(_) => BlockKind::MediaText,
            ContentRecord::More(_) => BlockKind::More,
            ContentRecord::Nextpage(_) => BlockKind::Nextpage,
            ContentRecord::Separator(_) => BlockKind::Separator,
            ContentRecord::Spacer(_) => BlockKind::Spacer,
        }
    }

    /// The `type` tag written on the wire
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// Every media `sourceUrl` this record references, in document order
    ///
    /// Hosts materialize these; the cover background is left out because it
    /// is emitted without a scheme.
    #[must_use]
    pub fn media_urls(&self) -> Vec<&str> {
        match self {
            ContentRecord::Image(content) => vec![content.image.source_url()],
            ContentRecord::Gallery(content) => {
                content.images.iter().map(ImageDescriptor::source_url).collect()
            }
            ContentRecord::MediaText(content) => vec![content.image.source_url()],
            ContentRecord::Audio(content) => vec![content.audio.source_url.as_str()],
            ContentRecord::File(content) => vec![content.source_url.as_str()],
            ContentRecord::Video(content) => vec![content.source_url.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Resolved image metadata; only the image resolver builds one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub(crate) image_id: String,
    pub(crate) caption: String,
    pub(crate) alt_text: String,
    pub(crate) title: String,
    pub(crate) source_url: String,
}

impl ImageDescriptor {
    #[must_use]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    #[must_use]
    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingContent {
    pub text: String,
    /// Tag name, `h1` to `h6`
    pub size: String,
}

/// Raw markup payload shared by Paragraph, Html and Verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlContent {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub image: ImageDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryContent {
    pub images: Vec<ImageDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContent {
    pub items: Vec<String>,
}

/// Payload shared by Quote and Pullquote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverContent {
    /// Background URL with its scheme removed
    pub background_image: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioContent {
    pub caption: String,
    pub audio: AudioSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSource {
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub source_url: String,
    pub text: String,
}

/// A copied element attribute; valueless attributes become `true`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    pub source_url: String,
    /// Every `<video>` attribute except `src`, flattened into the payload
    #[serde(flatten)]
    pub attributes: VideoAttributes,
}

/// Copied element attributes, kept in source order
///
/// Serializes as the entries of a map, so it can be flattened into its
/// parent payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoAttributes(Vec<(String, AttributeValue)>);

impl VideoAttributes {
    pub fn push(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.0.push((key.into(), value));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for VideoAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VideoAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = VideoAttributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of element attributes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut attributes = VideoAttributes::default();
                while let Some((key, value)) = access.next_entry::<String, AttributeValue>()? {
                    attributes.push(key, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreformattedContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContent {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContent {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// 1-based
    pub index: usize,
    pub columns: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// 1-based
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonContent {
    pub text: String,
    pub link: String,
    /// Link without scheme and site origin
    pub slug: String,
}

/// `{type, text}` entry for one element of nested content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    #[serde(rename = "type")]
    pub tag: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsContent {
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub content: Vec<TextEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTextContent {
    pub content: Vec<TextEntry>,
    pub image: ImageDescriptor,
}

/// `{}` payload of the marker blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyContent {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerContent {
    /// Inline style declarations, later duplicates overriding earlier ones
    #[serde(flatten)]
    pub properties: BTreeMap<String, String>,
}
