//! REST client for the site's media collection
//!
//! `GET <endpoint>/<id>` against `wp-json/wp/v2/media/`, decoded into a
//! [`MediaRecord`].

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use url::Url;

use super::{MediaLookup, MediaRecord};
use crate::error::LookupError;
use crate::utils::constants::{MEDIA_LOOKUP_TIMEOUT_SECS, USER_AGENT, WP_MEDIA_PATH};

/// [`MediaLookup`] backed by the WordPress REST API
#[derive(Debug, Clone)]
pub struct WpMediaClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl WpMediaClient {
    /// Client for a media collection URL such as
    /// `https://example.com/wp-json/wp/v2/media`
    pub fn new(endpoint: &str) -> Result<Self, LookupError> {
        let mut endpoint = endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        let endpoint =
            Url::parse(&endpoint).map_err(|_| LookupError::InvalidEndpoint(endpoint.clone()))?;
        if endpoint.cannot_be_a_base() {
            return Err(LookupError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            endpoint,
            timeout: Duration::from_secs(MEDIA_LOOKUP_TIMEOUT_SECS),
        })
    }

    /// Client for the media collection below a site root
    pub fn for_site(site: &str) -> Result<Self, LookupError> {
        let site = site.trim().trim_end_matches('/');
        Self::new(&format!("{site}/{WP_MEDIA_PATH}"))
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn media_url(&self, id: &str) -> Result<Url, LookupError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(LookupError::Other(format!("invalid media id `{id}`")));
        }

        self.endpoint
            .join(id)
            .map_err(|e| LookupError::Other(format!("cannot build media URL for `{id}`: {e}")))
    }
}

impl MediaLookup for WpMediaClient {
    fn fetch_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<MediaRecord, LookupError>> {
        Box::pin(async move {
            let url = self.media_url(id)?;
            log::debug!("Fetching media metadata from {url}");

            let response = self
                .client
                .get(url)
                .timeout(self.timeout)
                .header("User-Agent", USER_AGENT)
                .header("Accept", "application/json")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                log::warn!("Media {id} lookup failed with status {status}");
                return Err(LookupError::Status {
                    id: id.to_string(),
                    status: status.as_u16(),
                });
            }

            Ok(response.json::<MediaRecord>().await?)
        })
    }
}
