//! Type-safe builder for `ParseContext`
//!
//! The media lookup is the one collaborator without a default, so the
//! builder only offers `build()` once it has been supplied.

use std::sync::Arc;

use crate::ast::{Html5everTree, HtmlTree};
use crate::media::MediaLookup;

use super::types::{ParseConfig, ParseContext, UnknownBlockPolicy, normalize_base_url};

/// Builder state before a media lookup is supplied
pub struct NoMediaLookup;

pub struct ParseContextBuilder<Media = NoMediaLookup> {
    pub(crate) config: ParseConfig,
    pub(crate) media: Media,
    pub(crate) markup: Arc<dyn HtmlTree>,
}

impl Default for ParseContextBuilder<NoMediaLookup> {
    fn default() -> Self {
        Self {
            config: ParseConfig::default(),
            media: NoMediaLookup,
            markup: Arc::new(Html5everTree),
        }
    }
}

impl ParseContext {
    /// Create a builder for configuring a `ParseContext` with a fluent interface
    #[must_use]
    pub fn builder() -> ParseContextBuilder<NoMediaLookup> {
        ParseContextBuilder::default()
    }
}

impl<Media> ParseContextBuilder<Media> {
    #[must_use]
    pub fn https(mut self, https: bool) -> Self {
        self.config.https = https;
        self
    }

    /// Site origin; a scheme or trailing slash is removed
    #[must_use]
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.config.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    #[must_use]
    pub fn unknown_blocks(mut self, policy: UnknownBlockPolicy) -> Self {
        self.config.unknown_blocks = policy;
        self
    }

    /// Replace every setting at once, e.g. with a config loaded from disk
    #[must_use]
    pub fn config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a different HTML parse/stringify provider
    #[must_use]
    pub fn markup(mut self, markup: Arc<dyn HtmlTree>) -> Self {
        self.markup = markup;
        self
    }
}

impl ParseContextBuilder<NoMediaLookup> {
    pub fn media_lookup(
        self,
        media: Arc<dyn MediaLookup>,
    ) -> ParseContextBuilder<Arc<dyn MediaLookup>> {
        ParseContextBuilder {
            config: self.config,
            media,
            markup: self.markup,
        }
    }
}

impl ParseContextBuilder<Arc<dyn MediaLookup>> {
    #[must_use]
    pub fn build(self) -> ParseContext {
        ParseContext {
            config: self.config,
            media: self.media,
            markup: self.markup,
        }
    }
}
