//! Extraction of text-bearing blocks

use std::sync::Arc;

use gutenblock::{BlockError, BlockKind, ContentRecord, extract};
use serde_json::json;

mod common;
use common::{input, stub_media, test_context};

async fn run(kind: BlockKind, html: &str) -> Result<ContentRecord, BlockError> {
    let ctx = test_context(Arc::new(stub_media()));
    extract(kind, &input(kind.block_name(), html), &ctx).await
}

#[tokio::test]
async fn test_heading_text_and_size() {
    let record = run(BlockKind::Heading, "\n<h3 class=\"wp-block-heading\">Getting started</h3>\n")
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Heading", "content": {"text": "Getting started", "size": "h3"}})
    );
}

#[tokio::test]
async fn test_heading_without_heading_element_fails() {
    let err = run(BlockKind::Heading, "<p>not a heading</p>").await.unwrap_err();
    assert!(matches!(err, BlockError::NotFound(_)));
}

#[tokio::test]
async fn test_paragraph_is_byte_identical() {
    let html = "\n<p>Some <strong>bold</strong> &amp; <a href=\"/x\">linked</a> text</p>\n";
    let record = run(BlockKind::Paragraph, html).await.unwrap();

    let ContentRecord::Paragraph(content) = record else {
        panic!("expected a paragraph record");
    };
    assert_eq!(content.html, html);
}

#[tokio::test]
async fn test_html_is_byte_identical() {
    let html = "<div class=\"embed\"><iframe src=\"https://example.com/embed\"></iframe></div>";
    let record = run(BlockKind::Html, html).await.unwrap();

    assert_eq!(record.type_name(), "HTML");
    let ContentRecord::Html(content) = record else {
        panic!("expected an HTML record");
    };
    assert_eq!(content.html, html);
}

#[tokio::test]
async fn test_list_items_in_order() {
    let record = run(
        BlockKind::List,
        "<ul class=\"wp-block-list\">\n<li>one</li>\n<li>two</li>\n<li>three</li>\n</ul>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "List", "content": {"items": ["one", "two", "three"]}})
    );
}

#[tokio::test]
async fn test_ordered_list() {
    let record = run(BlockKind::List, "<ol><li>first</li><li>second</li></ol>")
        .await
        .unwrap();
    let ContentRecord::List(content) = record else {
        panic!("expected a list record");
    };
    assert_eq!(content.items, ["first", "second"]);
}

#[tokio::test]
async fn test_list_item_with_markup_first_is_invalid_shape() {
    let err = run(BlockKind::List, "<ul><li><strong>bold</strong> item</li></ul>")
        .await
        .unwrap_err();
    assert!(matches!(err, BlockError::InvalidShape(_)));
}

#[tokio::test]
async fn test_quote_with_citation() {
    let record = run(
        BlockKind::Quote,
        "<blockquote class=\"wp-block-quote\"><p>Simplicity is prerequisite for reliability.</p><cite>Dijkstra</cite></blockquote>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "type": "Quote",
            "content": {"text": "Simplicity is prerequisite for reliability.", "citation": "Dijkstra"}
        })
    );
}

#[tokio::test]
async fn test_quote_without_citation() {
    let record = run(BlockKind::Quote, "<blockquote class=\"wp-block-quote\"><p>Alone</p></blockquote>")
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Quote", "content": {"text": "Alone"}})
    );
}

#[tokio::test]
async fn test_pullquote() {
    let record = run(
        BlockKind::Pullquote,
        "<figure class=\"wp-block-pullquote\"><blockquote><p>Big words</p><cite>Someone</cite></blockquote></figure>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "PullQuote", "content": {"text": "Big words", "citation": "Someone"}})
    );
}

#[tokio::test]
async fn test_preformatted_text() {
    let record = run(
        BlockKind::Preformatted,
        "<pre class=\"wp-block-preformatted\">  indented\n  lines</pre>",
    )
    .await
    .unwrap();
    let ContentRecord::Preformatted(content) = record else {
        panic!("expected a preformatted record");
    };
    assert_eq!(content.text, "  indented\n  lines");
}

#[tokio::test]
async fn test_code_decodes_entities() {
    let record = run(
        BlockKind::Code,
        "<pre class=\"wp-block-code\"><code>if a &lt; b { return; }</code></pre>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Code", "content": {"code": "if a < b { return; }"}})
    );
}

#[tokio::test]
async fn test_code_without_code_element_fails() {
    let err = run(BlockKind::Code, "<pre class=\"wp-block-code\">plain</pre>")
        .await
        .unwrap_err();
    assert!(matches!(err, BlockError::NotFound(_)));
}

#[tokio::test]
async fn test_verse_keeps_line_breaks() {
    let record = run(
        BlockKind::Verse,
        "<pre class=\"wp-block-verse\">Roses are red<br>Violets are blue</pre>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Verse", "content": {"html": "Roses are red<br>Violets are blue"}})
    );
}

#[tokio::test]
async fn test_quote_ignores_children_after_citation() {
    let record = run(
        BlockKind::Quote,
        "<blockquote class=\"wp-block-quote\"><p>Text</p><cite>Who</cite><p><em>later</em></p></blockquote>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Quote", "content": {"text": "Text", "citation": "Who"}})
    );
}

#[tokio::test]
async fn test_pullquote_ignores_children_after_citation() {
    let record = run(
        BlockKind::Pullquote,
        "<figure class=\"wp-block-pullquote\"><blockquote><p>Big</p><cite>Me</cite><p><strong>extra</strong></p></blockquote></figure>",
    )
    .await
    .unwrap();

    let ContentRecord::Pullquote(content) = record else {
        panic!("expected a pullquote record");
    };
    assert_eq!(content.text, "Big");
    assert_eq!(content.citation.as_deref(), Some("Me"));
}

#[tokio::test]
async fn test_preformatted_keeps_leading_line_break() {
    let record = run(
        BlockKind::Preformatted,
        "<pre class=\"wp-block-preformatted\">\nline1\nline2</pre>",
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"type": "Preformatted", "content": {"text": "\nline1\nline2"}})
    );
}
