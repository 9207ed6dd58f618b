//! HTML parse/stringify provider.
//!
//! [`HtmlTree`] is the seam between the extractors and whatever HTML parser
//! the host prefers. [`Html5everTree`] is the default: html5ever builds an
//! `RcDom`, which is immediately converted into owned [`Node`]s.

use std::borrow::Cow;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Attribute, Element, Node};

/// Parse an HTML fragment into an owned forest and serialize it back
pub trait HtmlTree: Send + Sync {
    /// Parse a fragment; the returned forest is the fragment's top level
    fn parse(&self, html: &str) -> Vec<Node>;

    /// Serialize a forest back to HTML
    fn stringify(&self, nodes: &[Node]) -> String;
}

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Start tag of an element whose first newline the HTML parser drops
static LEADING_NEWLINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(<(?:pre|textarea|listing)(?:\s[^>]*)?>)(\r?\n)")
        .expect("Invalid leading newline regex")
});

/// Elements whose text content is written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// html5ever-backed [`HtmlTree`]
///
/// Fragments are parsed as a document body, so the usual HTML tree
/// construction rules apply: a bare `<tr>` gains its `<tbody>`, entities are
/// decoded in text and attribute values, and leading whitespace is dropped.
/// A newline directly after `<pre>`, `<textarea>` or `<listing>` is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html5everTree;

impl HtmlTree for Html5everTree {
    fn parse(&self, html: &str) -> Vec<Node> {
        let html = keep_leading_newlines(html);
        let dom = parse_document(RcDom::default(), Default::default()).one(html.as_ref());

        let Some(body) = find_body(&dom.document) else {
            tracing::trace!("parsed fragment has no body element");
            return Vec::new();
        };

        let children = body.children.borrow();
        children.iter().filter_map(convert).collect()
    }

    fn stringify(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            write_node(node, false, &mut out);
        }
        out
    }
}

/// Double the newline after a `<pre>`-like start tag so the one the parser
/// swallows is not part of the content
fn keep_leading_newlines(html: &str) -> Cow<'_, str> {
    LEADING_NEWLINE_REGEX.replace_all(html, "${1}${2}${2}")
}

fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = document
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("html"))
        .cloned()?;

    html.children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("body"))
        .cloned()
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| Attribute {
                    key: attr.name.local.to_string(),
                    value: attr.value.to_string(),
                })
                .collect();
            let children = handle.children.borrow().iter().filter_map(convert).collect();

            Some(Node::Element(Element {
                tag: name.local.to_string(),
                attributes,
                children,
            }))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.key);
        if !attr.value.is_empty() {
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
            out.push('"');
        }
    }
    out.push('>');

    let tag = element.tag.as_str();
    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    let raw_text = RAW_TEXT_ELEMENTS.contains(&tag);
    for child in &element.children {
        write_node(child, raw_text, out);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_attribute_order() {
        let nodes = Html5everTree.parse(r#"<video controls src="a.mp4" loop></video>"#);
        let Some(Node::Element(video)) = nodes.first() else {
            panic!("expected a video element, got {nodes:?}");
        };
        let keys: Vec<&str> = video.attributes.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["controls", "src", "loop"]);
        assert_eq!(video.attr("controls"), Some(""));
    }

    #[test]
    fn parse_inserts_table_body() {
        let nodes = Html5everTree.parse("<table><tr><td>a</td></tr></table>");
        let table = nodes[0].as_element().expect("table");
        assert_eq!(table.children[0].as_element().map(|e| e.tag.as_str()), Some("tbody"));
    }

    #[test]
    fn stringify_preserves_line_breaks() {
        let html = "Roses are red<br>Violets are <em>blue</em>";
        let nodes = Html5everTree.parse(html);
        assert_eq!(Html5everTree.stringify(&nodes), html);
    }

    #[test]
    fn parse_keeps_newline_after_pre() {
        let nodes = Html5everTree.parse("<pre class=\"wp-block-preformatted\">\nline1\nline2</pre>");
        let pre = nodes[0].as_element().expect("pre");
        assert_eq!(pre.children, vec![Node::text("\nline1\nline2")]);

        let nodes = Html5everTree.parse("<pre>line1</pre><pre>\r\n</pre>");
        assert_eq!(nodes[0].as_element().expect("pre").children, vec![Node::text("line1")]);
        assert_eq!(nodes[1].as_element().expect("pre").children, vec![Node::text("\n")]);
    }

    #[test]
    fn stringify_escapes_text_and_attributes() {
        let node = Node::Element(
            Element::new("a")
                .with_attr("title", "say \"hi\"")
                .with_text("fish & chips"),
        );
        assert_eq!(
            Html5everTree.stringify(&[node]),
            r#"<a title="say &quot;hi&quot;">fish &amp; chips</a>"#
        );
    }
}
