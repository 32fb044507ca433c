// Error types for the chat layer

use thiserror::Error;

use crate::downloader::ExtractError;

#[derive(Debug, Error)]
pub enum BotError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Telegram API request failed
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Fetching the video file itself failed
    #[error("Video download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The page had metadata but no playable video URL
    #[error("No video URL in extracted data")]
    MissingVideoUrl,
}
