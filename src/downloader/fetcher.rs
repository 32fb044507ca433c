// HTTP page fetcher backed by reqwest

use async_trait::async_trait;

use super::errors::ExtractError;
use super::models::NetworkConfig;
use super::traits::PageFetcher;
use super::utils;

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            client: utils::build_client(config)?,
        })
    }

    /// Wrap an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "TikTok returned non-success status");
            return Err(ExtractError::Retrieval(format!("HTTP {}", status)));
        }

        let body = response.text().await?;
        tracing::debug!(url = %url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
