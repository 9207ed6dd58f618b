//! Host-side node wrapping.
//!
//! A content-graph host stores every record as a node with its own identity
//! and a digest of its content. How identities and digests are computed is
//! up to the host, through [`NodeHost`]; [`DefaultNodeHost`] covers the
//! common case.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blocks::ContentRecord;
use crate::error::MaterializeError;
use crate::media::MediaMaterializer;
use crate::utils::constants::{NODE_ID_PREFIX, NODE_TYPE_PREFIX};

/// Identity and digest capability supplied by the host
pub trait NodeHost: Send + Sync {
    /// Turn a unique seed into a node identity
    fn create_node_id(&self, seed: &str) -> String;

    /// Stable digest of a record; equal records give equal digests
    fn content_digest(&self, record: &ContentRecord) -> Result<String, serde_json::Error>;
}

/// Seeds are used as ids unchanged; digests are xxh3-64 over the record JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNodeHost;

impl NodeHost for DefaultNodeHost {
    fn create_node_id(&self, seed: &str) -> String {
        seed.to_string()
    }

    fn content_digest(&self, record: &ContentRecord) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(record)?;
        Ok(format!("{:x}", xxhash_rust::xxh3::xxh3_64(&json)))
    }
}

/// Host bookkeeping attached to every node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInternal {
    /// `GutenbergBlock<Type>`
    #[serde(rename = "type")]
    pub node_type: String,
    /// The record's content, serialized to a JSON string
    pub content: String,
    pub content_digest: String,
}

/// A record wrapped as a child node of the post it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub id: String,
    pub parent: String,
    pub children: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub content: serde_json::Value,
    pub internal: NodeInternal,
}

/// Wrap `record` as a node owned by `parent_id`
pub fn into_node(
    record: &ContentRecord,
    parent_id: &str,
    host: &dyn NodeHost,
) -> Result<BlockNode, serde_json::Error> {
    let seed = format!("{NODE_ID_PREFIX}{}", Uuid::new_v4().simple());
    let type_name = record.type_name();

    let mut value = serde_json::to_value(record)?;
    let content = value
        .get_mut("content")
        .map(serde_json::Value::take)
        .unwrap_or_default();

    Ok(BlockNode {
        id: host.create_node_id(&seed),
        parent: parent_id.to_string(),
        children: Vec::new(),
        type_name: type_name.to_string(),
        internal: NodeInternal {
            node_type: format!("{NODE_TYPE_PREFIX}{type_name}"),
            content: serde_json::to_string(&content)?,
            content_digest: host.content_digest(record)?,
        },
        content,
    })
}

/// Materialize every media URL of a node's record, one after another
pub async fn materialize_all(
    record: &ContentRecord,
    node: &BlockNode,
    materializer: &dyn MediaMaterializer,
) -> Result<Vec<PathBuf>, MaterializeError> {
    let mut paths = Vec::new();
    for url in record.media_urls() {
        tracing::debug!(node = %node.id, url, "materializing media");
        paths.push(materializer.materialize(url, &node.id).await?);
    }
    Ok(paths)
}
