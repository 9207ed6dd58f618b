//! Block kinds, extractor inputs and dispatch.
//!
//! Every recognized block name maps to one [`BlockKind`], and every kind to
//! one extractor through the exhaustive `match` in [`extract`]. Adding a
//! block type means adding a variant; the compiler points at everything
//! else that has to change.
//!
//! All extractors share the signature
//! `async fn(&BlockInput, &ParseContext) -> BlockResult<ContentRecord>`,
//! whether or not they perform I/O.

pub mod layout;
pub mod media;
pub mod schema;
pub mod text;

use std::fmt;

use crate::ast::{HtmlTree, Node};
use crate::config::ParseContext;
use crate::document::RawBlock;
use crate::error::BlockResult;

pub use schema::ContentRecord;

/// The closed set of supported block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Gallery,
    List,
    Quote,
    Cover,
    Audio,
    File,
    Video,
    Preformatted,
    Code,
    Html,
    Pullquote,
    Table,
    Verse,
    Button,
    Columns,
    MediaText,
    More,
    Nextpage,
    Separator,
    Spacer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 23] = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Gallery,
        BlockKind::List,
        BlockKind::Quote,
        BlockKind::Cover,
        BlockKind::Audio,
        BlockKind::File,
        BlockKind::Video,
        BlockKind::Preformatted,
        BlockKind::Code,
        BlockKind::Html,
        BlockKind::Pullquote,
        BlockKind::Table,
        BlockKind::Verse,
        BlockKind::Button,
        BlockKind::Columns,
        BlockKind::MediaText,
        BlockKind::More,
        BlockKind::Nextpage,
        BlockKind::Separator,
        BlockKind::Spacer,
    ];

    /// Resolve an editor block name such as `core/heading`
    #[must_use]
    pub fn from_block_name(name: &str) -> Option<Self> {
        let kind = match name {
            "core/heading" => BlockKind::Heading,
            "core/paragraph" => BlockKind::Paragraph,
            "core/image" => BlockKind::Image,
            "core/gallery" => BlockKind::Gallery,
            "core/list" => BlockKind::List,
            "core/quote" => BlockKind::Quote,
            "core/cover" | "core/cover-image" => BlockKind::Cover,
            "core/audio" => BlockKind::Audio,
            "core/file" => BlockKind::File,
            "core/video" => BlockKind::Video,
            "core/preformatted" => BlockKind::Preformatted,
            "core/code" => BlockKind::Code,
            "core/html" => BlockKind::Html,
            "core/pullquote" => BlockKind::Pullquote,
            "core/table" => BlockKind::Table,
            "core/verse" => BlockKind::Verse,
            "core/button" => BlockKind::Button,
            "core/columns" => BlockKind::Columns,
            "core/media-text" => BlockKind::MediaText,
            "core/more" => BlockKind::More,
            "core/nextpage" => BlockKind::Nextpage,
            "core/separator" => BlockKind::Separator,
            "core/spacer" => BlockKind::Spacer,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical editor block name
    #[must_use]
    pub fn block_name(self) -> &'static str {
        match self {
            BlockKind::Heading => "core/heading",
            BlockKind::Paragraph => "core/paragraph",
            BlockKind::Image => "core/image",
            BlockKind::Gallery => "core/gallery",
            BlockKind::List => "core/list",
            BlockKind::Quote => "core/quote",
            BlockKind::Cover => "core/cover",
            BlockKind::Audio => "core/audio",
            BlockKind::File => "core/file",
            BlockKind::Video => "core/video",
            BlockKind::Preformatted => "core/preformatted",
            BlockKind::Code => "core/code",
            BlockKind::Html => "core/html",
            BlockKind::Pullquote => "core/pullquote",
            BlockKind::Table => "core/table",
            BlockKind::Verse => "core/verse",
            BlockKind::Button => "core/button",
            BlockKind::Columns => "core/columns",
            BlockKind::MediaText => "core/media-text",
            BlockKind::More => "core/more",
            BlockKind::Nextpage => "core/nextpage",
            BlockKind::Separator => "core/separator",
            BlockKind::Spacer => "core/spacer",
        }
    }

    /// The record `type` tag this kind produces
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            BlockKind::Heading => "Heading",
            BlockKind::Paragraph => "Paragraph",
            BlockKind::Image => "Image",
            BlockKind::Gallery => "Gallery",
            BlockKind::List => "List",
            BlockKind::Quote => "Quote",
            BlockKind::Cover => "Cover",
            BlockKind::Audio => "Audio",
            BlockKind::File => "File",
            BlockKind::Video => "Video",
            BlockKind::Preformatted => "Preformatted",
            BlockKind::Code => "Code",
            BlockKind::Html => "HTML",
            BlockKind::Pullquote => "PullQuote",
            BlockKind::Table => "Table",
            BlockKind::Verse => "Verse",
            BlockKind::Button => "Button",
            BlockKind::Columns => "Columns",
            BlockKind::MediaText => "MediaText",
            BlockKind::More => "More",
            BlockKind::Nextpage => "NextPage",
            BlockKind::Separator => "Separator",
            BlockKind::Spacer => "Spacer",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block_name())
    }
}

/// One block ready for extraction: its markup, parsed forest and inner blocks
///
/// Inner blocks are prepared before their parent, so container extractors
/// see them fully parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInput {
    pub(crate) name: String,
    pub(crate) html: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) inner_blocks: Vec<BlockInput>,
}

impl BlockInput {
    /// Parse `html` with `tree`; no inner blocks
    pub fn new(name: impl Into<String>, html: impl Into<String>, tree: &dyn HtmlTree) -> Self {
        let html = html.into();
        let nodes = tree.parse(&html);
        Self {
            name: name.into(),
            html,
            nodes,
            inner_blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_inner_blocks(mut self, inner_blocks: Vec<BlockInput>) -> Self {
        self.inner_blocks = inner_blocks;
        self
    }

    /// Build the input tree for a raw block, inner blocks first
    pub fn prepare(raw: &RawBlock, tree: &dyn HtmlTree) -> Self {
        let inner_blocks = raw
            .inner_blocks
            .iter()
            .map(|inner| BlockInput::prepare(inner, tree))
            .collect();

        BlockInput::new(raw.name.clone(), raw.inner_html.clone(), tree)
            .with_inner_blocks(inner_blocks)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The block's markup exactly as supplied
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn inner_blocks(&self) -> &[BlockInput] {
        &self.inner_blocks
    }
}

/// Run the extractor for `kind` on one prepared block
pub async fn extract(
    kind: BlockKind,
    input: &BlockInput,
    ctx: &ParseContext,
) -> BlockResult<ContentRecord> {
    match kind {
        BlockKind::Heading => text::heading(input, ctx).await,
        BlockKind::Paragraph => text::paragraph(input, ctx).await,
        BlockKind::Image => media::image(input, ctx).await,
        BlockKind::Gallery => media::gallery(input, ctx).await,
        BlockKind::List => text::list(input, ctx).await,
        BlockKind::Quote => text::quote(input, ctx).await,
        BlockKind::Cover => media::cover(input, ctx).await,
        BlockKind::Audio => media::audio(input, ctx).await,
        BlockKind::File => media::file(input, ctx).await,
        BlockKind::Video => media::video(input, ctx).await,
        BlockKind::Preformatted => text::preformatted(input, ctx).await,
        BlockKind::Code => text::code(input, ctx).await,
        BlockKind::Html => text::html(input, ctx).await,
        BlockKind::Pullquote => text::pullquote(input, ctx).await,
        BlockKind::Table => layout::table(input, ctx).await,
        BlockKind::Verse => text::verse(input, ctx).await,
        BlockKind::Button => layout::button(input, ctx).await,
        BlockKind::Columns => layout::columns(input, ctx).await,
        BlockKind::MediaText => media::media_text(input, ctx).await,
        BlockKind::More => layout::more(input, ctx).await,
        BlockKind::Nextpage => layout::nextpage(input, ctx).await,
        BlockKind::Separator => layout::separator(input, ctx).await,
        BlockKind::Spacer => layout::spacer(input, ctx).await,
    }
}

/// Element `tag` at the top level, or directly inside a top-level `<figure>`
///
/// Newer editor versions wrap tables and galleries in a figure.
pub(crate) fn find_maybe_in_figure<'a>(
    nodes: &'a [Node],
    tag: &str,
) -> BlockResult<&'a crate::ast::Element> {
    match crate::locate::find_by_tag(nodes, tag) {
        Ok(element) => Ok(element),
        Err(not_found) => crate::locate::find_by_tag(nodes, "figure")
            .ok()
            .and_then(|figure| crate::locate::find_child(figure, tag))
            .ok_or(not_found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_names_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_block_name(kind.block_name()), Some(kind));
        }
    }

    #[test]
    fn legacy_cover_name_is_recognized() {
        assert_eq!(
            BlockKind::from_block_name("core/cover-image"),
            Some(BlockKind::Cover)
        );
        assert_eq!(BlockKind::from_block_name("core/column"), None);
        assert_eq!(BlockKind::from_block_name("heading"), None);
    }
}
