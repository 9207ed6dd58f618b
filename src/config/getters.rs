//! Getter methods for `ParseConfig` and `ParseContext`

use crate::ast::HtmlTree;
use crate::media::MediaLookup;

use super::types::{ParseConfig, ParseContext, UnknownBlockPolicy};

impl ParseConfig {
    #[must_use]
    pub fn https(&self) -> bool {
        self.https
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn unknown_blocks(&self) -> UnknownBlockPolicy {
        self.unknown_blocks
    }
}

impl ParseContext {
    #[must_use]
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    #[must_use]
    pub fn https(&self) -> bool {
        self.config.https
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[must_use]
    pub fn unknown_blocks(&self) -> UnknownBlockPolicy {
        self.config.unknown_blocks
    }

    #[must_use]
    pub fn media(&self) -> &dyn MediaLookup {
        self.media.as_ref()
    }

    #[must_use]
    pub fn markup(&self) -> &dyn HtmlTree {
        self.markup.as_ref()
    }
}
