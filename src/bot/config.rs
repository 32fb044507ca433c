// Bot configuration loaded from the environment (and `.env`)

use std::path::PathBuf;

use super::errors::BotError;
use crate::downloader::NetworkConfig;

pub const DEFAULT_THUMB_URL: &str = "https://storage.googleapis.com/tiktokbot/icon.jpg";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Settings for requests to TikTok
    pub network: NetworkConfig,
    /// Directory where videos are staged before upload
    pub staging_dir: PathBuf,
    /// Thumbnail for inline results without a cover
    pub fallback_thumb_url: String,
}

impl BotConfig {
    /// Read the configuration from process environment, loading `.env` first
    pub fn from_env() -> Result<Self, BotError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var("TELEGRAM_TOKEN")
            .ok_or_else(|| BotError::Config("TELEGRAM_TOKEN is not set".to_string()))?;

        let mut network = NetworkConfig::default().with_proxy(var("TIKTOK_PROXY"));
        if let Some(raw) = var("TIKTOK_TIMEOUT_SECS") {
            let seconds = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    BotError::Config(format!("TIKTOK_TIMEOUT_SECS must be a positive integer, got {:?}", raw))
                })?;
            network = network.with_timeout(Some(seconds));
        }
        if let Some(agent) = var("TIKTOK_USER_AGENT") {
            network = network.with_user_agent(agent);
        }

        let staging_dir = var("TIKTOK_STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_staging_dir);

        Ok(Self {
            token,
            network,
            staging_dir,
            fallback_thumb_url: var("TIKTOK_THUMB_URL")
                .unwrap_or_else(|| DEFAULT_THUMB_URL.to_string()),
        })
    }
}

fn default_staging_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("tiktok-bot"))
        .unwrap_or_else(std::env::temp_dir)
}
