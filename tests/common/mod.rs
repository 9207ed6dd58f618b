//! Test utilities shared by the gutenblock integration tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use gutenblock::{
    BlockInput, ContentRecord, Html5everTree, LookupError, MediaLookup, MediaRecord,
    ParseContext, RawBlock, UnknownBlockPolicy,
};

/// In-memory media lookup recording every id it is asked for
#[derive(Debug, Default)]
pub struct StubMediaLookup {
    records: HashMap<String, MediaRecord>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubMediaLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, id: &str, record: MediaRecord) -> Self {
        self.records.insert(id.to_string(), record);
        self
    }

    /// Hold the lookup for `id` back by `delay` before answering
    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

impl MediaLookup for StubMediaLookup {
    fn fetch_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MediaRecord, LookupError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .expect("calls lock poisoned")
                .push(id.to_string());

            if let Some(delay) = self.delays.get(id) {
                tokio::time::sleep(*delay).await;
            }

            self.records
                .get(id)
                .cloned()
                .ok_or_else(|| LookupError::Status {
                    id: id.to_string(),
                    status: 404,
                })
        })
    }
}

/// Lookup answering ids 1 to 9 with `https://example.com/uploads/<id>.jpg`
#[allow(dead_code)]
pub fn stub_media() -> StubMediaLookup {
    (1..=9).fold(StubMediaLookup::new(), |stub, id| {
        stub.with_record(
            &id.to_string(),
            MediaRecord::new(
                format!("https://example.com/uploads/{id}.jpg"),
                format!("Alt {id}"),
                format!("Title {id}"),
            ),
        )
    })
}

#[allow(dead_code)]
pub fn test_context(media: Arc<StubMediaLookup>) -> ParseContext {
    ParseContext::builder()
        .https(true)
        .base_url("https://example.com")
        .media_lookup(media)
        .build()
}

#[allow(dead_code)]
pub fn lenient_context(media: Arc<StubMediaLookup>) -> ParseContext {
    ParseContext::builder()
        .https(true)
        .base_url("https://example.com")
        .unknown_blocks(UnknownBlockPolicy::Skip)
        .media_lookup(media)
        .build()
}

/// Parse one block's markup the way the dispatcher does
#[allow(dead_code)]
pub fn input(name: &str, html: &str) -> BlockInput {
    BlockInput::new(name, html, &Html5everTree)
}

/// Prepare a raw block tree, inner blocks included
#[allow(dead_code)]
pub fn prepared(raw: &RawBlock) -> BlockInput {
    BlockInput::prepare(raw, &Html5everTree)
}

/// Markup of an image figure carrying `wp-image-<id>`
#[allow(dead_code)]
pub fn image_figure(id: &str, caption: Option<&str>) -> String {
    let caption = caption
        .map(|text| format!("<figcaption>{text}</figcaption>"))
        .unwrap_or_default();
    format!(
        r#"<figure class="wp-block-image"><img src="https://example.com/wp-content/uploads/{id}.jpg" alt="" class="wp-image-{id}"/>{caption}</figure>"#
    )
}

/// Record type names in order
#[allow(dead_code)]
pub fn type_names(records: &[ContentRecord]) -> Vec<&'static str> {
    records.iter().map(ContentRecord::type_name).collect()
}
