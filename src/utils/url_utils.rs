//! URL scheme utilities.
//!
//! Every absolute URL a block extractor emits passes through
//! [`normalize_scheme`] so that a whole document agrees on `http` or `https`.

use super::constants::{HTTPS_PREFIX, HTTP_PREFIX};

/// Rewrite the URL's leading scheme to match `force_https`
///
/// `true` turns a leading `http://` into `https://`, `false` turns a leading
/// `https://` into `http://`. URLs already on the target scheme, or using
/// neither scheme literally, are returned unchanged.
#[must_use]
pub fn normalize_scheme(url: &str, force_https: bool) -> String {
    if force_https {
        match url.strip_prefix(HTTP_PREFIX) {
            Some(rest) => format!("{HTTPS_PREFIX}{rest}"),
            None => url.to_string(),
        }
    } else {
        match url.strip_prefix(HTTPS_PREFIX) {
            Some(rest) => format!("{HTTP_PREFIX}{rest}"),
            None => url.to_string(),
        }
    }
}

/// Remove one leading `https://` or `http://`
#[must_use]
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix(HTTPS_PREFIX)
        .or_else(|| url.strip_prefix(HTTP_PREFIX))
        .unwrap_or(url)
}

/// Check if a URL uses the http or https scheme
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
