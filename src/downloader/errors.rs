// Error types for share-link extraction

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Link does not look like a TikTok share link
    #[error("Invalid TikTok share link: {0}")]
    InvalidLink(String),

    /// Request failed or TikTok answered with a non-success status
    #[error("Could not make request to TikTok: {0}")]
    Retrieval(String),

    /// Page was fetched but no usable video data was found in it
    #[error("Could not extract video data: {0}")]
    Extraction(String),
}

impl ExtractError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLink(_) => "invalid_link",
            Self::Retrieval(_) => "retrieval",
            Self::Extraction(_) => "extraction",
        }
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Retrieval(format!("timed out: {}", e));
        }
        if let Some(status) = e.status() {
            return Self::Retrieval(format!("HTTP {}", status));
        }
        Self::Retrieval(e.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        Self::Extraction(format!("embedded JSON is malformed: {}", e))
    }
}
