// Telegram update handlers

use std::sync::Arc;

use tempfile::NamedTempFile;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineQuery, InlineQueryResult, InlineQueryResultVideo, InputFile, MessageEntityKind,
    MessageId,
};
use teloxide::utils::command::BotCommands;

use super::caption::format_caption;
use super::config::BotConfig;
use super::errors::BotError;
use super::staging::stage_video;
use crate::downloader::utils::is_share_link;
use crate::downloader::{VideoExtractor, VideoRecord};

const START_TEXT: &str =
    "Hey! 👋🏽 Add me to a group, send a TikTok share link and I'll reply with the actual video!";
const FAILURE_TEXT: &str = "Could not download video 😭 are you sure this is a valid TikTok video?";
const INLINE_TITLE: &str = "Send this video";

pub type HandlerResult = Result<(), BotError>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "introduce the bot")]
    Start,
}

/// Shared by every handler
pub struct BotState {
    pub extractor: VideoExtractor,
    /// Client used to download video files
    pub client: reqwest::Client,
    pub config: BotConfig,
}

pub async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> HandlerResult {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, START_TEXT).await?;
        }
    }
    Ok(())
}

/// Process every share link in the message, each in its own task
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> HandlerResult {
    for url in share_links(&msg) {
        let bot = bot.clone();
        let msg = msg.clone();
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = process_video(&bot, &msg, &url, &state).await {
                tracing::warn!(url = %url, chat = %msg.chat.id, error = %e, "Failed to process video");
            }
        });
    }
    Ok(())
}

pub async fn handle_inline_query(bot: Bot, query: InlineQuery, state: Arc<BotState>) -> HandlerResult {
    let Some(url) = query.query.split_whitespace().next() else {
        return Ok(());
    };
    if !is_share_link(url) {
        return Ok(());
    }

    let record = match state.extractor.get_video(url).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(url = %url, kind = e.kind(), error = %e, "Inline lookup failed");
            return Ok(());
        }
    };

    match inline_result(&record, &state.config.fallback_thumb_url) {
        Some(result) => {
            bot.answer_inline_query(query.id, vec![result]).await?;
        }
        None => tracing::warn!(url = %url, "Extracted video has no usable URL for inline result"),
    }
    Ok(())
}

/// Share links found in URL and text-link entities, in order, without duplicates
pub fn share_links(msg: &Message) -> Vec<String> {
    let entities = msg
        .parse_entities()
        .into_iter()
        .chain(msg.parse_caption_entities())
        .flatten();

    let mut links: Vec<String> = Vec::new();
    for entity in entities {
        let url = match entity.kind() {
            MessageEntityKind::Url => entity.text().to_string(),
            MessageEntityKind::TextLink { url } => url.to_string(),
            _ => continue,
        };
        if is_share_link(&url) && !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

async fn process_video(bot: &Bot, msg: &Message, url: &str, state: &BotState) -> HandlerResult {
    let status = bot
        .send_message(msg.chat.id, format!("Downloading {} 🤯🤓😇🤖", url))
        .disable_notification(true)
        .disable_web_page_preview(true)
        .reply_to_message_id(msg.id)
        .await?;

    let (record, staged) = match fetch_and_stage(state, url).await {
        Ok(done) => done,
        Err(e) => {
            bot.edit_message_text(msg.chat.id, status.id, FAILURE_TEXT).await?;
            return Err(e);
        }
    };

    discard_status(bot, msg.chat.id, status.id).await;

    let caption = format_caption(&record);
    let mut request = bot
        .send_video(msg.chat.id, InputFile::file(staged.path().to_path_buf()))
        .disable_notification(true)
        .reply_to_message_id(msg.id);
    if !caption.is_empty() {
        request = request.caption(caption);
    }
    request.await?;

    tracing::info!(url = %url, id = ?record.id, "Processed video");
    Ok(())
}

/// Remove the "Downloading" reply. The video is still sent if this fails.
async fn discard_status(bot: &Bot, chat_id: ChatId, message_id: MessageId) {
    if let Err(e) = bot.delete_message(chat_id, message_id).await {
        tracing::warn!(chat = %chat_id, error = %e, "Could not delete status message");
    }
}

async fn fetch_and_stage(
    state: &BotState,
    url: &str,
) -> Result<(VideoRecord, NamedTempFile), BotError> {
    let record = state.extractor.get_video(url).await?;
    let video_url = record.video_url.as_deref().ok_or(BotError::MissingVideoUrl)?;
    let staged = stage_video(&state.client, video_url, &state.config.staging_dir).await?;
    Ok((record, staged))
}

/// Inline answer for an extracted video, or `None` when it has no playable URL
pub fn inline_result(record: &VideoRecord, fallback_thumb_url: &str) -> Option<InlineQueryResult> {
    let video_url = reqwest::Url::parse(record.video_url.as_deref()?).ok()?;
    let thumb_url = record
        .cover_url
        .as_deref()
        .and_then(|cover| reqwest::Url::parse(cover).ok())
        .or_else(|| reqwest::Url::parse(fallback_thumb_url).ok())?;
    let mime_type: mime::Mime = "video/mp4".parse().ok()?;

    // Telegram limits result ids to 64 bytes
    let id = record
        .id
        .clone()
        .filter(|id| !id.is_empty() && id.len() <= 64)
        .unwrap_or_else(|| "video".to_string());

    let mut video = InlineQueryResultVideo::new(id, video_url, mime_type, thumb_url, INLINE_TITLE);
    let caption = format_caption(record);
    if !caption.is_empty() {
        video = video.caption(caption);
    }
    if let Some(text) = &record.text {
        video = video.description(text.clone());
    }
    Some(InlineQueryResult::Video(video))
}
