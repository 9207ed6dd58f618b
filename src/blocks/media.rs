//! Media blocks.
//!
//! Image, Gallery and MediaText go through the image resolver and therefore
//! suspend on the media lookup. Audio, File and Video read their URL straight
//! from the markup and only normalize its scheme. Gallery items are resolved
//! one after another, in document order; the first failure aborts the block.

use super::schema::{
    AttributeValue, AudioContent, AudioSource, ContentRecord, CoverContent, FileContent,
    GalleryContent, ImageContent, MediaTextContent, TextEntry, VideoAttributes, VideoContent,
};
use super::{BlockInput, find_maybe_in_figure};
use crate::ast::elements;
use crate::config::ParseContext;
use crate::error::{BlockError, BlockResult};
use crate::locate::{
    find_attr, find_by_tag, find_child, find_descendant, first_child_element,
    first_text_content, require_child,
};
use crate::media::{resolve_figure, resolve_image};
use crate::utils::constants::BACKGROUND_IMAGE_PREFIX;
use crate::utils::{normalize_scheme, strip_scheme};

pub async fn image(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let image = resolve_image(input.nodes(), ctx).await?;
    Ok(ContentRecord::Image(ImageContent { image }))
}

pub async fn gallery(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let list = find_maybe_in_figure(input.nodes(), "ul")?;

    let mut images = Vec::new();
    for item in list.child_elements() {
        images.push(resolve_image(&item.children, ctx).await?);
    }

    Ok(ContentRecord::Gallery(GalleryContent { images }))
}

/// Background comes from the inline style; text from the first inner
/// paragraph, or from a `<p>` inside the cover itself for legacy markup
pub async fn cover(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let container = find_by_tag(input.nodes(), "div")?;
    let style = find_attr(&container.attributes, "style")?;
    let background = background_image_url(style).ok_or_else(|| {
        BlockError::NotFound("`background-image:url(...)` in cover style".to_string())
    })?;

    let paragraph = match input.inner_blocks().first() {
        Some(inner) => find_by_tag(inner.nodes(), "p")?,
        None => find_descendant(container, "p").ok_or_else(|| BlockError::element("p"))?,
    };

    Ok(ContentRecord::Cover(CoverContent {
        background_image: strip_scheme(background).to_string(),
        text: first_text_content(paragraph)?.to_string(),
    }))
}

/// URL inside `background-image:url(...)`, without surrounding quotes
fn background_image_url(style: &str) -> Option<&str> {
    let start = style.find(BACKGROUND_IMAGE_PREFIX)? + BACKGROUND_IMAGE_PREFIX.len();
    let rest = &style[start..];
    let end = rest.find(')')?;
    let url = rest[..end].trim().trim_matches(|c: char| c == '\'' || c == '"');
    (!url.is_empty()).then_some(url)
}

pub async fn audio(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let figure = find_by_tag(input.nodes(), "figure")?;
    let audio = require_child(figure, "audio")?;
    let source_url = normalize_scheme(find_attr(&audio.attributes, "src")?, ctx.https());

    let caption = match find_child(figure, "figcaption") {
        Some(figcaption) => first_text_content(figcaption)?.to_string(),
        None => String::new(),
    };

    Ok(ContentRecord::Audio(AudioContent {
        caption,
        audio: AudioSource { source_url },
    }))
}

pub async fn file(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let container = find_by_tag(input.nodes(), "div")?;
    let link = first_child_element(container)?;

    Ok(ContentRecord::File(FileContent {
        source_url: normalize_scheme(find_attr(&link.attributes, "href")?, ctx.https()),
        text: first_text_content(link)?.to_string(),
    }))
}

/// `src` becomes `sourceUrl`; every other attribute is copied as-is
pub async fn video(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let figure = find_by_tag(input.nodes(), "figure")?;
    let video = first_child_element(figure)?;
    let source_url = normalize_scheme(find_attr(&video.attributes, "src")?, ctx.https());

    let mut attributes = VideoAttributes::default();
    for attr in video.attributes.iter().filter(|attr| attr.key != "src") {
        let value = if attr.value.is_empty() {
            AttributeValue::Flag(true)
        } else {
            AttributeValue::Text(attr.value.clone())
        };
        attributes.push(attr.key.clone(), value);
    }

    Ok(ContentRecord::Video(VideoContent {
        source_url,
        attributes,
    }))
}

/// Text entries come from the elements of the first inner block only
pub async fn media_text(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let container = find_by_tag(input.nodes(), "div")?;
    let figure = first_child_element(container)?;

    let inner = input
        .inner_blocks()
        .first()
        .ok_or_else(|| BlockError::NotFound("media-text inner block".to_string()))?;
    let content = elements(inner.nodes())
        .map(|element| {
            Ok(TextEntry {
                tag: element.tag.clone(),
                text: first_text_content(element)?.to_string(),
            })
        })
        .collect::<BlockResult<Vec<_>>>()?;

    let image = resolve_figure(figure, ctx).await?;

    Ok(ContentRecord::MediaText(MediaTextContent { content, image }))
}
