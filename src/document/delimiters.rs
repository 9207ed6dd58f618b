//! Block delimiter scanning.
//!
//! Serialized posts mark blocks with HTML comments:
//!
//! ```text
//! <!-- wp:heading {"level":3} -->
//! <h3>Title</h3>
//! <!-- /wp:heading -->
//! <!-- wp:separator /-->
//! ```
//!
//! A block's `inner_html` is its own markup with nested blocks cut out; the
//! nested blocks become its `inner_blocks`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::RawBlock;
use crate::error::DelimiterError;
use crate::utils::constants::{DEFAULT_BLOCK_NAMESPACE, FREEFORM_BLOCK_NAME};

static DELIMITER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)<!--\s+(?P<closer>/)?wp:(?P<namespace>[a-z][a-z0-9_-]*/)?(?P<name>[a-z][a-z0-9_-]*)\s+(?P<attrs>\{.*?\}\s+)?(?P<void>/)?-->",
    )
    .expect("Invalid block delimiter regex")
});

/// A block whose closer has not been seen yet
struct OpenBlock {
    name: String,
    attrs: Map<String, Value>,
    html: String,
    inner_blocks: Vec<RawBlock>,
    opened_at: usize,
}

impl OpenBlock {
    fn close(self) -> RawBlock {
        RawBlock {
            name: self.name,
            attrs: self.attrs,
            inner_html: self.html,
            inner_blocks: self.inner_blocks,
        }
    }
}

/// Split a serialized post into its top-level blocks
///
/// Non-blank text between top-level blocks becomes a `core/freeform`
/// block; blank gaps are dropped.
pub fn split_blocks(post: &str) -> Result<Vec<RawBlock>, DelimiterError> {
    let mut output = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut cursor = 0;

    for caps in DELIMITER_REGEX.captures_iter(post) {
        let Some(delimiter) = caps.get(0) else {
            continue;
        };
        push_text(&mut stack, &mut output, &post[cursor..delimiter.start()]);
        cursor = delimiter.end();

        let name = block_name(&caps);

        if caps.name("closer").is_some() {
            let Some(open) = stack.pop() else {
                return Err(DelimiterError::Unbalanced {
                    offset: delimiter.start(),
                    message: format!("closer for `{name}` without an open block"),
                });
            };
            if open.name != name {
                return Err(DelimiterError::Unbalanced {
                    offset: delimiter.start(),
                    message: format!("expected closer for `{}`, found `{name}`", open.name),
                });
            }
            attach(&mut stack, &mut output, open.close());
            continue;
        }

        let attrs = block_attrs(&name, &caps)?;
        if caps.name("void").is_some() {
            attach(
                &mut stack,
                &mut output,
                RawBlock {
                    name,
                    attrs,
                    inner_html: String::new(),
                    inner_blocks: Vec::new(),
                },
            );
        } else {
            stack.push(OpenBlock {
                name,
                attrs,
                html: String::new(),
                inner_blocks: Vec::new(),
                opened_at: delimiter.start(),
            });
        }
    }

    push_text(&mut stack, &mut output, &post[cursor..]);

    if let Some(open) = stack.last() {
        return Err(DelimiterError::Unbalanced {
            offset: open.opened_at,
            message: format!("block `{}` is never closed", open.name),
        });
    }

    tracing::trace!(blocks = output.len(), "split post into blocks");
    Ok(output)
}

fn block_name(caps: &Captures<'_>) -> String {
    let name = caps.name("name").map_or("", |m| m.as_str());
    match caps.name("namespace") {
        Some(namespace) => format!("{}{name}", namespace.as_str()),
        None => format!("{DEFAULT_BLOCK_NAMESPACE}/{name}"),
    }
}

fn block_attrs(name: &str, caps: &Captures<'_>) -> Result<Map<String, Value>, DelimiterError> {
    match caps.name("attrs") {
        None => Ok(Map::new()),
        Some(attrs) => serde_json::from_str(attrs.as_str().trim()).map_err(|source| {
            DelimiterError::Attributes {
                block_name: name.to_string(),
                source,
            }
        }),
    }
}

fn push_text(stack: &mut [OpenBlock], output: &mut Vec<RawBlock>, text: &str) {
    match stack.last_mut() {
        Some(open) => open.html.push_str(text),
        None if !text.trim().is_empty() => output.push(RawBlock::new(FREEFORM_BLOCK_NAME, text)),
        None => {}
    }
}

fn attach(stack: &mut [OpenBlock], output: &mut Vec<RawBlock>, block: RawBlock) {
    match stack.last_mut() {
        Some(parent) => parent.inner_blocks.push(block),
        None => output.push(block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_get_core_namespace() {
        let blocks = split_blocks("<!-- wp:separator /-->\n<!-- wp:acme/widget /-->").unwrap();
        let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["core/separator", "acme/widget"]);
    }

    #[test]
    fn nested_attributes_are_parsed() {
        let blocks =
            split_blocks(r#"<!-- wp:spacer {"height":50,"style":{"x":1}} /-->"#).unwrap();
        assert_eq!(blocks[0].attrs["height"], 50);
        assert_eq!(blocks[0].attrs["style"]["x"], 1);
    }

    #[test]
    fn mismatched_closer_is_rejected() {
        let err = split_blocks("<!-- wp:quote --><p>x</p><!-- /wp:paragraph -->").unwrap_err();
        assert!(matches!(err, DelimiterError::Unbalanced { .. }));
    }
}
