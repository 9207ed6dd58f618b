//! Configuration module for block parsing
//!
//! This module provides the serde-friendly `ParseConfig`, the `ParseContext`
//! threaded through every extraction call, and its type-safe builder.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ParseContextBuilder;
pub use types::{ParseConfig, ParseContext, UnknownBlockPolicy};
