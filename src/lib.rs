pub mod bot;
pub mod downloader;

use tracing_subscriber::EnvFilter;

pub use bot::{BotConfig, BotError};
pub use downloader::{ExtractError, VideoExtractor, VideoRecord};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `tiktok_bot=info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tiktok_bot=info,tiktok_bot_lib=info,teloxide=warn"));

    // Ignore the error if a subscriber is already set (e.g. in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration from the environment and run the bot
pub async fn run() -> Result<(), BotError> {
    init_tracing();
    let config = BotConfig::from_env()?;
    bot::start(config).await
}
