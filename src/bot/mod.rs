// Telegram front end: message, inline query and command handlers

pub mod caption;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod staging;

use std::sync::Arc;

use teloxide::prelude::*;

use crate::downloader::utils::build_client;
use crate::downloader::{HttpFetcher, VideoExtractor};

pub use config::BotConfig;
pub use errors::BotError;
use handlers::{BotState, Command};

/// Start long polling and dispatch updates until Ctrl-C
pub async fn start(config: BotConfig) -> Result<(), BotError> {
    std::fs::create_dir_all(&config.staging_dir)?;

    // One client for both page fetches and video downloads
    let client = build_client(&config.network)?;
    let extractor =
        VideoExtractor::with_fetcher(Box::new(HttpFetcher::with_client(client.clone())));

    let bot = Bot::new(config.token.clone());
    let state = Arc::new(BotState {
        extractor,
        client,
        config,
    });

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(Update::filter_inline_query().endpoint(handlers::handle_inline_query))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    tracing::info!(staging_dir = %state.config.staging_dir.display(), "TikBot booted");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
