// Parse a serialized post and print its content records as JSON.
//
// Usage: gutenblock <post.html>
//
// GUTENBLOCK_MEDIA_ENDPOINT  media collection URL (or GUTENBLOCK_BASE_URL + wp-json/wp/v2/media/)
// GUTENBLOCK_HTTPS           "false" to emit http:// media URLs (default true)
// GUTENBLOCK_BASE_URL        site origin stripped from button links

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use gutenblock::utils::{HTTPS_PREFIX, is_web_url};
use gutenblock::{ParseContext, WpMediaClient, parse_post};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: gutenblock <post.html>");
    };

    let https = match env::var("GUTENBLOCK_HTTPS") {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"),
        Err(_) => true,
    };
    let base_url = env::var("GUTENBLOCK_BASE_URL").unwrap_or_default();

    let media = match env::var("GUTENBLOCK_MEDIA_ENDPOINT") {
        Ok(endpoint) => WpMediaClient::new(&endpoint)
            .with_context(|| format!("invalid media endpoint {endpoint}"))?,
        Err(_) if !base_url.is_empty() => {
            let site = if is_web_url(&base_url) {
                base_url.clone()
            } else {
                format!("{HTTPS_PREFIX}{base_url}")
            };
            WpMediaClient::for_site(&site).with_context(|| format!("invalid site URL {site}"))?
        }
        Err(_) => bail!("set GUTENBLOCK_MEDIA_ENDPOINT or GUTENBLOCK_BASE_URL"),
    };

    let ctx = ParseContext::builder()
        .https(https)
        .base_url(&base_url)
        .media_lookup(Arc::new(media))
        .build();

    let post = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;

    let records = parse_post(&post, &ctx)
        .await
        .with_context(|| format!("failed to parse {path}"))?;
    tracing::info!(records = records.len(), path = %path, "post parsed");

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
