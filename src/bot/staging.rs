// Stage a video on disk before re-uploading it to Telegram

use std::path::Path;

use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use super::errors::BotError;

/// Stream `video_url` into a temporary `.mp4` inside `dir`.
///
/// The file is removed when the returned handle is dropped.
pub async fn stage_video(
    client: &reqwest::Client,
    video_url: &str,
    dir: &Path,
) -> Result<NamedTempFile, BotError> {
    let staged = tempfile::Builder::new()
        .prefix("tiktok-")
        .suffix(".mp4")
        .tempfile_in(dir)?;

    let mut response = client.get(video_url).send().await?.error_for_status()?;
    let mut file = tokio::fs::File::from_std(staged.reopen()?);

    let mut written = 0usize;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len();
    }
    file.flush().await?;

    tracing::debug!(path = %staged.path().display(), bytes = written, "Staged video");
    Ok(staged)
}
