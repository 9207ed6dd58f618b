//! Document-level parsing.
//!
//! [`parse_document`] walks a post's blocks in order, prepares each one (inner
//! blocks first), picks the extractor for its kind and awaits it in place.
//! The first failure aborts the whole document; there is no partial output.

pub mod delimiters;

pub use delimiters::split_blocks;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::blocks::{BlockInput, BlockKind, ContentRecord, extract};
use crate::config::{ParseContext, UnknownBlockPolicy};
use crate::error::{BlockError, DocumentError, Error};

/// A block as delivered by the delimiter scanner or the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    /// Namespaced block name, e.g. `core/heading`
    #[serde(rename = "blockName")]
    pub name: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
    /// Markup of the block itself, without nested blocks
    #[serde(default, rename = "innerHTML")]
    pub inner_html: String,
    #[serde(default)]
    pub inner_blocks: Vec<RawBlock>,
}

impl RawBlock {
    pub fn new(name: impl Into<String>, inner_html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Map::new(),
            inner_html: inner_html.into(),
            inner_blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_inner_blocks(mut self, inner_blocks: Vec<RawBlock>) -> Self {
        self.inner_blocks = inner_blocks;
        self
    }
}

/// Extract every block of a document, preserving document order
pub async fn parse_document(
    blocks: &[RawBlock],
    ctx: &ParseContext,
) -> Result<Vec<ContentRecord>, DocumentError> {
    let mut records = Vec::with_capacity(blocks.len());

    for (index, raw) in blocks.iter().enumerate() {
        let Some(kind) = BlockKind::from_block_name(&raw.name) else {
            match ctx.unknown_blocks() {
                UnknownBlockPolicy::Skip => {
                    tracing::warn!(index, block_name = %raw.name, "skipping unknown block type");
                    continue;
                }
                UnknownBlockPolicy::Fail => {
                    return Err(DocumentError {
                        index,
                        block_name: raw.name.clone(),
                        source: BlockError::UnknownBlockType(raw.name.clone()),
                    });
                }
            }
        };

        let input = BlockInput::prepare(raw, ctx.markup());
        tracing::debug!(
            index,
            block_name = %raw.name,
            inner_blocks = input.inner_blocks().len(),
            "extracting block"
        );

        let record = extract(kind, &input, ctx).await.map_err(|source| {
            tracing::error!(index, block_name = %raw.name, error = %source, "block extraction failed");
            DocumentError {
                index,
                block_name: raw.name.clone(),
                source,
            }
        })?;
        records.push(record);
    }

    tracing::debug!(records = records.len(), "document parsed");
    Ok(records)
}

/// Split serialized post content into blocks and extract them
pub async fn parse_post(post: &str, ctx: &ParseContext) -> Result<Vec<ContentRecord>, Error> {
    let blocks = split_blocks(post)?;
    Ok(parse_document(&blocks, ctx).await?)
}
