pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{is_web_url, normalize_scheme, strip_scheme};
