//! Image resolution.
//!
//! The block markup identifies an image by a `wp-image-<id>` class token on
//! its `<img>`; everything else comes from the media lookup.

use crate::ast::{Element, Node};
use crate::blocks::schema::ImageDescriptor;
use crate::config::ParseContext;
use crate::error::{BlockError, BlockResult};
use crate::locate::{find_by_tag, find_child, find_descendant, first_text_content};
use crate::utils::constants::WP_IMAGE_MARKER;
use crate::utils::normalize_scheme;

/// Resolve the first top-level `<figure>` among `nodes`
pub async fn resolve_image(nodes: &[Node], ctx: &ParseContext) -> BlockResult<ImageDescriptor> {
    let figure = find_by_tag(nodes, "figure")?;
    resolve_figure(figure, ctx).await
}

/// Resolve a `<figure>` holding an `<img>` and an optional `<figcaption>`
///
/// The `<img>` may sit inside a link wrapper. One lookup is made per call;
/// repeated ids are fetched again.
pub async fn resolve_figure(figure: &Element, ctx: &ParseContext) -> BlockResult<ImageDescriptor> {
    let img = find_descendant(figure, "img").ok_or_else(|| BlockError::element("img"))?;

    let caption = match find_child(figure, "figcaption") {
        Some(figcaption) => first_text_content(figcaption)?.to_string(),
        None => String::new(),
    };

    let image_id = image_id(img)?;
    tracing::debug!(image_id = %image_id, "resolving image metadata");

    let record = ctx
        .media()
        .fetch_by_id(&image_id)
        .await
        .map_err(|source| {
            tracing::warn!(image_id = %image_id, error = %source, "image lookup failed");
            BlockError::RemoteLookupFailed {
                id: image_id.clone(),
                source,
            }
        })?;

    Ok(ImageDescriptor {
        source_url: normalize_scheme(&record.source_url, ctx.https()),
        image_id,
        caption,
        alt_text: record.alt_text,
        title: record.title.rendered,
    })
}

/// Id carried by the first `wp-image-<id>` token among the attribute values
fn image_id(img: &Element) -> BlockResult<String> {
    img.attributes
        .iter()
        .filter(|attr| attr.value.contains(WP_IMAGE_MARKER))
        .flat_map(|attr| attr.value.split_whitespace())
        .find_map(|token| token.strip_prefix(WP_IMAGE_MARKER))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(BlockError::MalformedImageMarker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_class_token() {
        let img = Element::new("img")
            .with_attr("src", "https://example.com/a.jpg")
            .with_attr("class", "alignnone size-full wp-image-42");
        assert_eq!(image_id(&img).unwrap(), "42");
    }

    #[test]
    fn missing_marker_is_malformed() {
        let img = Element::new("img").with_attr("class", "size-full");
        assert!(matches!(image_id(&img), Err(BlockError::MalformedImageMarker)));

        let empty = Element::new("img").with_attr("class", "wp-image-");
        assert!(matches!(image_id(&empty), Err(BlockError::MalformedImageMarker)));
    }
}
