//! Instagram link flow: status message, download, delivery, cleanup

use std::path::Path;

use teloxide::prelude::*;
use teloxide::types::{Message, ReplyParameters};

use super::types::{HandlerDeps, HandlerError};
use crate::core::classify::extract_shortcode;
use crate::core::error::AppResult;
use crate::download::extract_reels_audio;
use crate::download::files::{remove_download_leftovers, remove_file_quietly};
use crate::telegram::send::{send_media, MediaKind};
use crate::telegram::texts;
use crate::telegram::Bot;

/// Downloads the Instagram content behind `url` and sends it back.
///
/// The status message is deleted after a successful delivery and edited
/// into an error text otherwise. The downloaded file and any other carousel
/// items are always removed.
pub async fn handle_instagram_link(
    bot: &Bot,
    msg: &Message,
    url: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    log::info!("Instagram link from chat {}: {}", chat_id, url);

    let status = bot
        .send_message(chat_id, texts::INSTAGRAM_LOADING)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    let Some(path) = deps.instagram.download_instagram_content(url).await else {
        bot.edit_message_text(chat_id, status.id, texts::INSTAGRAM_DOWNLOAD_FAILED)
            .await?;
        return Ok(());
    };

    let delivered = deliver(bot, chat_id, &path, deps).await;
    remove_file_quietly(&path);
    if let Some(shortcode) = extract_shortcode(url) {
        remove_download_leftovers(deps.settings.download_dir(), &shortcode);
    }

    match delivered {
        Ok(()) => {
            if let Err(e) = bot.delete_message(chat_id, status.id).await {
                log::warn!("Failed to delete status message: {}", e);
            }
        }
        Err(e) => {
            log::error!("Error sending file [{}]: {}", e.category(), e);
            bot.edit_message_text(chat_id, status.id, texts::INSTAGRAM_SEND_FAILED)
                .await?;
        }
    }
    Ok(())
}

/// Sends the media and, for videos, the extracted soundtrack.
async fn deliver(bot: &Bot, chat_id: ChatId, path: &Path, deps: &HandlerDeps) -> AppResult<()> {
    send_media(bot, chat_id, path, texts::INSTAGRAM_CAPTION).await?;

    if MediaKind::from_path(path) != MediaKind::Video {
        return Ok(());
    }

    if let Some(audio) = extract_reels_audio(&deps.settings, path).await {
        let sent = send_media(bot, chat_id, &audio, texts::REELS_AUDIO_CAPTION).await;
        remove_file_quietly(&audio);
        sent?;
    }
    Ok(())
}
