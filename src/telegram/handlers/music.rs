//! Music search results and the download-on-tap callback

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode, ReplyParameters};

use super::types::{HandlerDeps, HandlerError};
use crate::download::files::remove_file_quietly;
use crate::download::SongResult;
use crate::telegram::send::send_audio_track;
use crate::telegram::texts;
use crate::telegram::Bot;

/// Callback data prefix of result buttons
pub const MUSIC_CALLBACK_PREFIX: &str = "music:";

/// `music:<key>`
pub fn music_callback_data(key: &str) -> String {
    format!("{}{}", MUSIC_CALLBACK_PREFIX, key)
}

/// Extracts the cache key from callback data, if it is a music button.
pub fn parse_music_callback(data: &str) -> Option<String> {
    data.strip_prefix(MUSIC_CALLBACK_PREFIX)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// One button per result, one result per row.
pub(super) fn results_keyboard(songs: &[SongResult]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(songs.iter().map(|song| {
        vec![InlineKeyboardButton::callback(
            texts::result_button_label(&song.title, &song.duration),
            music_callback_data(&song.key),
        )]
    }))
}

/// Searches music for `query` and turns the status message into a result list.
pub async fn handle_music_search(
    bot: &Bot,
    msg: &Message,
    query: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let chat_id = msg.chat.id;
    log::info!("Music search from chat {}: {}", chat_id, query);

    let status = bot
        .send_message(chat_id, texts::SEARCHING)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    let songs = deps.music.search_music(query).await;
    if songs.is_empty() {
        bot.edit_message_text(chat_id, status.id, texts::NOTHING_FOUND).await?;
        return Ok(());
    }

    bot.edit_message_text(chat_id, status.id, texts::search_results_header(query))
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(results_keyboard(&songs))
        .await?;
    Ok(())
}

/// Downloads the track behind a result button and sends it as audio.
pub async fn handle_music_callback(
    bot: &Bot,
    q: &CallbackQuery,
    key: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let Some(track) = deps.music.cache().get(key) else {
        let (hits, misses) = deps.music.cache().stats();
        log::info!(
            "Unknown or expired search key: {} (cache size {}, hits {}, misses {})",
            key,
            deps.music.cache().len(),
            hits,
            misses
        );
        bot.answer_callback_query(q.id.clone())
            .text(texts::SEARCH_EXPIRED)
            .show_alert(true)
            .await?;
        return Ok(());
    };

    // The query may have expired while the update waited; the download still goes ahead
    if let Err(e) = bot
        .answer_callback_query(q.id.clone())
        .text(texts::TRACK_LOADING)
        .await
    {
        log::warn!("Failed to answer callback {:?}: {}", q.id, e);
    }

    let Some(message) = q.message.as_ref() else {
        log::warn!("Callback {:?} has no message attached", q.id);
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    if let Err(e) = bot
        .edit_message_text(chat_id, message_id, texts::track_downloading(&track.title))
        .parse_mode(ParseMode::MarkdownV2)
        .await
    {
        log::warn!("Failed to show download status: {}", e);
    }

    let Some(downloaded) = deps.music.download_music(&track.url).await else {
        bot.edit_message_text(chat_id, message_id, texts::TRACK_DOWNLOAD_FAILED)
            .await?;
        return Ok(());
    };

    let performer = if downloaded.artist.is_empty() {
        track.artist.as_str()
    } else {
        downloaded.artist.as_str()
    };
    let sent = send_audio_track(
        bot,
        chat_id,
        &downloaded.path,
        texts::TRACK_CAPTION,
        &downloaded.title,
        performer,
    )
    .await;
    remove_file_quietly(&downloaded.path);

    match sent {
        Ok(_) => {
            if let Err(e) = bot.delete_message(chat_id, message_id).await {
                log::warn!("Failed to delete results message: {}", e);
            }
        }
        Err(e) => {
            log::error!("Error sending audio [{}]: {}", e.category(), e);
            bot.edit_message_text(chat_id, message_id, texts::TRACK_SEND_FAILED)
                .await?;
        }
    }
    Ok(())
}
