//! Sending downloaded files through the Bot API
//!
//! The media type is picked from the file extension. Every send checks the
//! file is still on disk first, so a vanished file shows up as a
//! `FileNotFound` error instead of an opaque upload failure.

use std::path::Path;

use teloxide::prelude::*;
use teloxide::types::{InputFile, Message};

use crate::core::error::AppResult;
use crate::download::error::DownloadError;
use crate::telegram::Bot;

/// Bot API upload method for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Photo,
    Audio,
    Document,
}

impl MediaKind {
    /// Classifies by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "mp4" | "mkv" | "mov" => MediaKind::Video,
            "jpg" | "jpeg" | "png" | "webp" => MediaKind::Photo,
            "mp3" | "m4a" | "opus" | "ogg" | "wav" => MediaKind::Audio,
            _ => MediaKind::Document,
        }
    }
}

fn ensure_exists(path: &Path) -> AppResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DownloadError::FileNotFound(format!("File disappeared before sending: {}", path.display())).into())
    }
}

/// Sends `path` with the upload method matching its extension.
pub async fn send_media(bot: &Bot, chat_id: ChatId, path: &Path, caption: &str) -> AppResult<Message> {
    ensure_exists(path)?;
    let file = InputFile::file(path);
    let kind = MediaKind::from_path(path);
    log::info!("Sending {:?} {} to chat {}", kind, path.display(), chat_id);

    let message = match kind {
        MediaKind::Video => bot.send_video(chat_id, file).caption(caption).await?,
        MediaKind::Photo => bot.send_photo(chat_id, file).caption(caption).await?,
        MediaKind::Audio => bot.send_audio(chat_id, file).caption(caption).await?,
        MediaKind::Document => bot.send_document(chat_id, file).caption(caption).await?,
    };
    Ok(message)
}

/// Sends an audio file with track metadata. Empty title/performer are left out.
pub async fn send_audio_track(
    bot: &Bot,
    chat_id: ChatId,
    path: &Path,
    caption: &str,
    title: &str,
    performer: &str,
) -> AppResult<Message> {
    ensure_exists(path)?;
    let mut request = bot.send_audio(chat_id, InputFile::file(path)).caption(caption);
    if !title.is_empty() {
        request = request.title(title);
    }
    if !performer.is_empty() {
        request = request.performer(performer);
    }
    Ok(request.await?)
}
