//! Core configuration types for block parsing
//!
//! `ParseConfig` holds the plain settings a host can load from a file;
//! `ParseContext` adds the collaborator capabilities and is what extractors
//! receive. Both are read-only once built.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::ast::HtmlTree;
use crate::media::MediaLookup;

/// What the dispatcher does with a block name it has no extractor for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownBlockPolicy {
    /// Abort the whole document with `UnknownBlockType`
    #[default]
    Fail,
    /// Log a warning and leave the block out of the output
    Skip,
}

/// Settings consumed by the extractors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Force `https://` (true) or `http://` (false) on emitted URLs
    pub(crate) https: bool,

    /// Site origin stripped from internal links.
    ///
    /// **INVARIANT:** stored without scheme or trailing slash
    /// (normalized in `ParseConfig::new`, the builder and on deserialization).
    #[serde(deserialize_with = "deserialize_base_url")]
    pub(crate) base_url: String,

    pub(crate) unknown_blocks: UnknownBlockPolicy,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            https: true,
            base_url: String::new(),
            unknown_blocks: UnknownBlockPolicy::Fail,
        }
    }
}

impl ParseConfig {
    #[must_use]
    pub fn new(https: bool, base_url: &str) -> Self {
        Self {
            https,
            base_url: normalize_base_url(base_url),
            unknown_blocks: UnknownBlockPolicy::Fail,
        }
    }

    #[must_use]
    pub fn with_unknown_blocks(mut self, policy: UnknownBlockPolicy) -> Self {
        self.unknown_blocks = policy;
        self
    }

    /// Load settings from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn deserialize_base_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let base_url = String::deserialize(deserializer)?;
    Ok(normalize_base_url(&base_url))
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    crate::utils::strip_scheme(base_url.trim())
        .trim_end_matches('/')
        .to_string()
}

/// Configuration plus collaborators, passed to every extractor
///
/// Cheap to clone and safe to share between concurrently parsed documents.
#[derive(Clone)]
pub struct ParseContext {
    pub(crate) config: ParseConfig,
    pub(crate) media: Arc<dyn MediaLookup>,
    pub(crate) markup: Arc<dyn HtmlTree>,
}

impl fmt::Debug for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
