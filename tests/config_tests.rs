//! Tests for the parse configuration and the context builder

use std::sync::Arc;

use gutenblock::{Html5everTree, HtmlTree, ParseConfig, ParseContext, UnknownBlockPolicy};

mod common;
use common::stub_media;

#[test]
fn test_builder_defaults() {
    // Without a media lookup there is no `build()`:
    // let ctx = ParseContext::builder().build();
    let ctx = ParseContext::builder()
        .media_lookup(Arc::new(stub_media()))
        .build();

    assert!(ctx.https());
    assert_eq!(ctx.base_url(), "");
    assert_eq!(ctx.unknown_blocks(), UnknownBlockPolicy::Fail);
    assert_eq!(ctx.config(), &ParseConfig::default());
}

#[test]
fn test_builder_normalizes_base_url() {
    let ctx = ParseContext::builder()
        .base_url("https://example.com/")
        .media_lookup(Arc::new(stub_media()))
        .build();
    assert_eq!(ctx.base_url(), "example.com");

    let config = ParseConfig::new(false, " http://blog.example.com// ");
    assert_eq!(config.base_url(), "blog.example.com");
    assert!(!config.https());
}

#[test]
fn test_settings_survive_media_lookup_step() {
    let ctx = ParseContext::builder()
        .https(false)
        .unknown_blocks(UnknownBlockPolicy::Skip)
        .media_lookup(Arc::new(stub_media()))
        .base_url("example.org")
        .build();

    assert!(!ctx.https());
    assert_eq!(ctx.unknown_blocks(), UnknownBlockPolicy::Skip);
    assert_eq!(ctx.base_url(), "example.org");
}

#[test]
fn test_config_from_json_defaults_missing_keys() {
    let config = ParseConfig::from_json_str(r#"{"base_url": "https://example.com/"}"#).unwrap();

    assert!(config.https());
    assert_eq!(config.base_url(), "example.com");
    assert_eq!(config.unknown_blocks(), UnknownBlockPolicy::Fail);
}

#[test]
fn test_config_rejects_unknown_policy() {
    assert!(ParseConfig::from_json_str(r#"{"unknown_blocks": "ignore"}"#).is_err());
}

#[test]
fn test_config_serializes_policy_in_snake_case() {
    let config = ParseConfig::new(true, "example.com").with_unknown_blocks(UnknownBlockPolicy::Skip);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"https": true, "base_url": "example.com", "unknown_blocks": "skip"})
    );
}

#[test]
fn test_custom_markup_provider() {
    struct UpperCase;

    impl HtmlTree for UpperCase {
        fn parse(&self, html: &str) -> Vec<gutenblock::ast::Node> {
            Html5everTree.parse(&html.to_uppercase())
        }

        fn stringify(&self, nodes: &[gutenblock::ast::Node]) -> String {
            Html5everTree.stringify(nodes)
        }
    }

    let ctx = ParseContext::builder()
        .markup(Arc::new(UpperCase))
        .media_lookup(Arc::new(stub_media()))
        .build();

    let nodes = ctx.markup().parse("<p>quiet</p>");
    assert_eq!(ctx.markup().stringify(&nodes), "<p>QUIET</p>");
}

#[test]
fn test_context_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseContext>();
}

#[test]
fn test_deserialized_config_normalizes_base_url() {
    let config: ParseConfig =
        serde_json::from_str(r#"{"base_url": "https://example.com/"}"#).unwrap();
    assert_eq!(config.base_url(), "example.com");

    let ctx = ParseContext::builder()
        .config(config)
        .media_lookup(Arc::new(stub_media()))
        .build();
    assert_eq!(ctx.base_url(), "example.com");
}

#[tokio::test]
async fn test_button_slug_with_deserialized_config() {
    let config: ParseConfig =
        serde_json::from_str(r#"{"base_url": "https://example.com/"}"#).unwrap();
    let ctx = ParseContext::builder()
        .config(config)
        .media_lookup(Arc::new(stub_media()))
        .build();
    let html = r#"<div class="wp-block-button"><a href="https://example.com/contact/">Contact</a></div>"#;

    let record = gutenblock::extract(
        gutenblock::BlockKind::Button,
        &common::input("core/button", html),
        &ctx,
    )
    .await
    .unwrap();

    let gutenblock::ContentRecord::Button(content) = record else {
        panic!("expected a button record");
    };
    assert_eq!(content.slug, "/contact/");
}
