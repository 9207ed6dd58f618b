//! Local materialization of emitted media URLs
//!
//! The extractors only ever emit `sourceUrl` strings. Hosts that want the
//! files on disk hand those URLs to a [`MediaMaterializer`] together with the
//! identity of the node that owns them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use url::Url;

use crate::error::MaterializeError;
use crate::utils::constants::{MEDIA_DOWNLOAD_TIMEOUT_SECS, USER_AGENT};

/// Download a remote resource and store it under a parent identity
pub trait MediaMaterializer: Send + Sync {
    fn materialize<'a>(
        &'a self,
        url: &'a str,
        parent_id: &'a str,
    ) -> BoxFuture<'a, Result<PathBuf, MaterializeError>>;
}

/// [`MediaMaterializer`] writing to `<root>/<parent_id>/<file name>`
///
/// A file that already exists at the target path is reused without a
/// request.
#[derive(Debug, Clone)]
pub struct HttpMaterializer {
    client: Client,
    root: PathBuf,
    timeout: Duration,
}

impl HttpMaterializer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            root: root.into(),
            timeout: Duration::from_secs(MEDIA_DOWNLOAD_TIMEOUT_SECS),
        }
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
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target path for `url` under `parent_id`, without touching the disk
    pub fn target_path(&self, url: &str, parent_id: &str) -> Result<PathBuf, MaterializeError> {
        let parsed = Url::parse(url).map_err(|_| MaterializeError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MaterializeError::InvalidUrl(url.to_string()));
        }

        let file_name = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("index");

        Ok(self
            .root
            .join(sanitize_filename::sanitize(parent_id))
            .join(sanitize_filename::sanitize(file_name)))
    }
}

impl MediaMaterializer for HttpMaterializer {
    fn materialize<'a>(
        &'a self,
        url: &'a str,
        parent_id: &'a str,
    ) -> BoxFuture<'a, Result<PathBuf, MaterializeError>> {
        Box::pin(async move {
            let path = self.target_path(url, parent_id)?;

            if tokio::fs::try_exists(&path).await? {
                log::debug!("Reusing materialized media at {}", path.display());
                return Ok(path);
            }

            let response = self
                .client
                .get(url)
                .timeout(self.timeout)
                .header("User-Agent", USER_AGENT)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(MaterializeError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let bytes = response.bytes().await?;

            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &bytes).await?;

            log::info!(
                "Materialized {url} ({} bytes) to {}",
                bytes.len(),
                path.display()
            );
            Ok(path)
        })
    }
}
