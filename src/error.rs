//! Error types for block extraction
//!
//! Every failure aborts the block being extracted and, through the
//! dispatcher, the whole document. Nothing here is retried.

use thiserror::Error;

/// Result type alias for single-block operations
pub type BlockResult<T> = Result<T, BlockError>;

/// Failures raised while extracting one block
#[derive(Debug, Error)]
pub enum BlockError {
    /// An expected element or attribute is absent
    #[error("{0} not found")]
    NotFound(String),

    /// The node exists but is not the expected kind
    #[error("unexpected node shape: {0}")]
    InvalidShape(String),

    /// The image element carries no `wp-image-<id>` marker
    #[error("image element carries no `wp-image-<id>` marker")]
    MalformedImageMarker,

    /// The remote content client failed to resolve an image
    #[error("remote lookup for image {id} failed: {source}")]
    RemoteLookupFailed {
        id: String,
        #[source]
        source: LookupError,
    },

    /// No extractor is registered for the block name
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
}

impl BlockError {
    pub(crate) fn element(tag: &str) -> Self {
        BlockError::NotFound(format!("<{tag}> element"))
    }

    pub(crate) fn attribute(key: &str) -> Self {
        BlockError::NotFound(format!("`{key}` attribute"))
    }
}

/// Errors surfaced by a [`MediaLookup`](crate::media::MediaLookup) implementation
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("media {id} request returned status {status}")]
    Status { id: String, status: u16 },

    /// The configured endpoint cannot be used as a base URL
    #[error("invalid media endpoint `{0}`")]
    InvalidEndpoint(String),

    /// Any other failure reported by a custom client
    #[error("{0}")]
    Other(String),
}

/// A block failure annotated with its position in the document
#[derive(Debug, Error)]
#[error("block #{index} ({block_name}): {source}")]
pub struct DocumentError {
    pub index: usize,
    pub block_name: String,
    #[source]
    pub source: BlockError,
}

impl DocumentError {
    /// The underlying block failure
    #[must_use]
    pub fn kind(&self) -> &BlockError {
        &self.source
    }
}

/// Errors from splitting serialized post content into blocks
#[derive(Debug, Error)]
pub enum DelimiterError {
    /// A closing delimiter does not match the open block, or a block was never closed
    #[error("unbalanced block delimiter at byte {offset}: {message}")]
    Unbalanced { offset: usize, message: String },

    /// The block attributes are not a valid JSON object
    #[error("invalid attributes for block `{block_name}`: {source}")]
    Attributes {
        block_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from downloading a referenced media file
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download of {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid media URL `{0}`")]
    InvalidUrl(String),
}

/// Top-level error for [`parse_post`](crate::parse_post)
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Delimiter(#[from] DelimiterError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
