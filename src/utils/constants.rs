//! Shared constants for block extraction
//!
//! Markers and prefixes of the block editor's markup convention, plus
//! defaults for the HTTP-facing collaborators.

pub const HTTP_PREFIX: &str = "http://";
pub const HTTPS_PREFIX: &str = "https://";

/// Class token prefix carrying an attachment id on `<img>` elements
pub const WP_IMAGE_MARKER: &str = "wp-image-";

/// Inline style prefix the cover block writes its background with
pub const BACKGROUND_IMAGE_PREFIX: &str = "background-image:url(";

/// Namespace implied by block comments that carry a bare name
pub const DEFAULT_BLOCK_NAMESPACE: &str = "core";

/// Block name given to top-level text outside any block delimiter
pub const FREEFORM_BLOCK_NAME: &str = "core/freeform";

/// Seed prefix for host node identities
pub const NODE_ID_PREFIX: &str = "gutenberg-block-";

/// Prefix of the host node type, followed by the record type name
pub const NODE_TYPE_PREFIX: &str = "GutenbergBlock";

/// Path of the media collection below a site root
pub const WP_MEDIA_PATH: &str = "wp-json/wp/v2/media/";

/// Timeout for a single media metadata request
///
/// The REST endpoint answers from the database; anything slower than this
/// is treated as a failed lookup.
pub const MEDIA_LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Timeout for downloading one media file
pub const MEDIA_DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// User agent sent by the HTTP collaborators
pub const USER_AGENT: &str = concat!("gutenblock/", env!("CARGO_PKG_VERSION"));
