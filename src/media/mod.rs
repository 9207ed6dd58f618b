//! Remote media collaborators.
//!
//! Image blocks only carry an attachment id in their markup; the canonical
//! URL, alt text and title live behind the site's content API. This module
//! holds the lookup seam ([`MediaLookup`]), its REST implementation, the
//! resolver that turns a `<figure>` into an [`ImageDescriptor`], and the
//! download seam hosts use to store emitted media files locally.
//!
//! [`ImageDescriptor`]: crate::blocks::schema::ImageDescriptor

pub mod client;
pub mod materializer;
pub mod resolver;

pub use client::WpMediaClient;
pub use materializer::{HttpMaterializer, MediaMaterializer};
pub use resolver::{resolve_figure, resolve_image};

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A `{rendered}` field as returned by the content API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// Canonical metadata of one media item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub title: Rendered,
}

impl MediaRecord {
    pub fn new(
        source_url: impl Into<String>,
        alt_text: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            alt_text: alt_text.into(),
            title: Rendered {
                rendered: title.into(),
            },
        }
    }
}

/// Resolve a media id to its canonical metadata
///
/// Called at most once per image reference per parse, never retried. Any
/// timeout policy belongs to the implementation.
pub trait MediaLookup: Send + Sync {
    fn fetch_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MediaRecord, LookupError>>;
}
