// Fetcher and payload locator trait definitions

use async_trait::async_trait;
use scraper::Html;

use super::errors::ExtractError;

/// Trait for the transport that retrieves a share-link page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Name of the fetcher (for logging)
    fn name(&self) -> &'static str;

    /// Retrieve the page body. A single attempt, no retries.
    async fn fetch(&self, url: &str) -> Result<String, ExtractError>;
}

/// Trait for one convention of embedding video data into a page
pub trait PayloadLocator: Send + Sync {
    /// Name of the convention (for logging)
    fn name(&self) -> &'static str;

    /// Find the raw JSON payload in the parsed page, if this convention is used
    fn locate(&self, document: &Html) -> Option<String>;

    /// JSON pointer from the payload root to the `videoData` object
    fn video_data_pointer(&self) -> &'static str;
}
