//! GitBook API client
//!
//! Uploads a zipped documentation tree to a GitBook space.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// GitBook API client
pub struct GitBookClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GitBookClient {
    /// Create a new GitBook client
    ///
    /// Fails when no API key is configured.
    pub fn new(client: reqwest::Client, config: &Config) -> AppResult<Self> {
        let api_key = config.gitbook.api_key.clone().ok_or_else(|| {
            AppError::Config(
                "GitBook API key is not configured; set LUMEN_DOCS_GITBOOK_API_KEY".to_string(),
            )
        })?;

        Ok(Self {
            client,
            base_url: config.gitbook.api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| AppError::Config("GitBook API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/zip"));
        Ok(headers)
    }

    /// Import a zip archive into the space
    #[instrument(skip(self, archive), fields(space_id = %space_id, bytes = archive.len()))]
    pub async fn import_archive(&self, space_id: &str, archive: Vec<u8>) -> AppResult<()> {
        let url = format!("{}/spaces/{}/content/import", self.base_url, space_id);

        debug!(url = %url, "Uploading documentation archive to GitBook");

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .body(archive)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "GitBook import response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "GitBook import failed");

            if status.as_u16() == 401 {
                return Err(AppError::Publish("GitBook rejected the API key".to_string()));
            }

            return Err(AppError::Publish(format!(
                "GitBook API error {}: {}",
                status, text
            )));
        }

        info!(space_id = %space_id, "Documentation imported into GitBook");
        Ok(())
    }
}
