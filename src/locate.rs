//! Attribute and child locators.
//!
//! Structural lookups shared by every block extractor. They encode no
//! knowledge of block formats; callers know the shape they expect and these
//! helpers fail loudly, with a named error, when it is not there.

use crate::ast::{Attribute, Element, Node, elements};
use crate::error::{BlockError, BlockResult};

/// First top-level element of `nodes` with the given tag
///
/// Only the given level is searched, not descendants.
pub fn find_by_tag<'a>(nodes: &'a [Node], tag: &str) -> BlockResult<&'a Element> {
    elements(nodes)
        .find(|element| element.tag == tag)
        .ok_or_else(|| BlockError::element(tag))
}

/// Value of the first attribute whose key is exactly `key`
pub fn find_attr<'a>(attributes: &'a [Attribute], key: &str) -> BlockResult<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
        .ok_or_else(|| BlockError::attribute(key))
}

/// Text of the element's first child
///
/// An empty element yields the empty string; a first child that is not a
/// text node is an [`BlockError::InvalidShape`].
pub fn first_text_content(element: &Element) -> BlockResult<&str> {
    match element.children.first() {
        None => Ok(""),
        Some(Node::Text(text)) => Ok(text),
        Some(other) => Err(BlockError::InvalidShape(format!(
            "expected text as first child of <{}>, found {}",
            element.tag,
            other.describe()
        ))),
    }
}

/// First child of `element` that is itself an element
pub fn first_child_element(element: &Element) -> BlockResult<&Element> {
    element.child_elements().next().ok_or_else(|| {
        BlockError::NotFound(format!("child element of <{}>", element.tag))
    })
}

/// Optional direct child with the given tag
#[must_use]
pub fn find_child<'a>(element: &'a Element, tag: &str) -> Option<&'a Element> {
    element.child_elements().find(|child| child.tag == tag)
}

/// Required direct child with the given tag
pub fn require_child<'a>(element: &'a Element, tag: &str) -> BlockResult<&'a Element> {
    find_child(element, tag).ok_or_else(|| {
        BlockError::NotFound(format!("<{tag}> element inside <{}>", element.tag))
    })
}

/// First descendant of `element` with the given tag, depth-first
#[must_use]
pub fn find_descendant<'a>(element: &'a Element, tag: &str) -> Option<&'a Element> {
    element.child_elements().find_map(|child| {
        if child.tag == tag {
            Some(child)
        } else {
            find_descendant(child, tag)
        }
    })
}

/// First text of every element child, in order
pub fn child_texts(element: &Element) -> BlockResult<Vec<String>> {
    element
        .child_elements()
        .map(|child| first_text_content(child).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<Node> {
        vec![
            Node::text("\n"),
            Element::new("ul")
                .with_attr("class", "wp-block-list")
                .with_child(Element::new("li").with_text("one"))
                .with_child(Node::text(" "))
                .with_child(Element::new("li").with_text("two"))
                .into(),
        ]
    }

    #[test]
    fn find_by_tag_skips_text() {
        let nodes = list();
        let ul = find_by_tag(&nodes, "ul").expect("ul");
        assert_eq!(ul.child_elements().count(), 2);
    }

    #[test]
    fn find_by_tag_is_not_recursive() {
        let nodes = list();
        assert!(matches!(find_by_tag(&nodes, "li"), Err(BlockError::NotFound(_))));
    }

    #[test]
    fn find_attr_requires_exact_key() {
        let nodes = list();
        let ul = find_by_tag(&nodes, "ul").expect("ul");
        assert_eq!(find_attr(&ul.attributes, "class").ok(), Some("wp-block-list"));
        assert!(find_attr(&ul.attributes, "clas").is_err());
    }

    #[test]
    fn first_text_content_rejects_elements() {
        let strong = Element::new("p").with_child(Element::new("strong").with_text("x"));
        assert!(matches!(
            first_text_content(&strong),
            Err(BlockError::InvalidShape(_))
        ));
        assert_eq!(first_text_content(&Element::new("td")).ok(), Some(""));
    }

    #[test]
    fn child_texts_in_order() {
        let nodes = list();
        let ul = find_by_tag(&nodes, "ul").expect("ul");
        assert_eq!(child_texts(ul).expect("texts"), ["one", "two"]);
    }
}
