//! Turn block-editor post markup into typed content records.
//!
//! A post is split into blocks ([`split_blocks`]), each block's markup is
//! parsed into a small owned syntax tree, and one extractor per
//! [`BlockKind`] turns it into a [`ContentRecord`]. Image-bearing blocks
//! resolve their metadata through a [`MediaLookup`].

pub mod ast;
pub mod blocks;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod locate;
pub mod media;
pub mod utils;

pub use ast::{Html5everTree, HtmlTree};
pub use blocks::schema::ImageDescriptor;
pub use blocks::{BlockInput, BlockKind, ContentRecord, extract};
pub use config::{ParseConfig, ParseContext, ParseContextBuilder, UnknownBlockPolicy};
pub use document::{RawBlock, parse_document, parse_post, split_blocks};
pub use error::{
    BlockError, BlockResult, DelimiterError, DocumentError, Error, LookupError, MaterializeError,
};
pub use host::{BlockNode, DefaultNodeHost, NodeHost, into_node, materialize_all};
pub use media::{HttpMaterializer, MediaLookup, MediaMaterializer, MediaRecord, WpMediaClient};
pub use utils::{normalize_scheme, strip_scheme};
