//! Owned HTML syntax tree.
//!
//! Block extractors never see parser-specific handles: the [`HtmlTree`]
//! provider converts its output into these plain, `Send` values, so a parsed
//! block can cross `.await` points and be shared freely.

pub mod tree;

pub use tree::{Html5everTree, HtmlTree};

/// One node of a parsed fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Shorthand for a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short description used in shape errors
    pub(crate) fn describe(&self) -> String {
        match self {
            Node::Element(element) => format!("<{}> element", element.tag),
            Node::Text(_) => "text node".to_string(),
            Node::Comment(_) => "comment".to_string(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A single attribute; order within an element follows the source markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    /// Boolean attributes (`<video controls>`) carry the empty string
    pub value: String,
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Element children, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Value of the first attribute named `key`
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// Top-level elements of a forest, skipping text and comments
pub fn elements(nodes: &[Node]) -> impl Iterator<Item = &Element> {
    nodes.iter().filter_map(Node::as_element)
}
