//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_start_command;
use super::instagram::handle_instagram_link;
use super::music::{handle_music_callback, handle_music_search, parse_music_callback};
use super::types::{HandlerDeps, HandlerError};
use crate::core::classify::{classify_text, MessageKind};
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
///
/// Order matters: registered commands first, then free text (Instagram links
/// before search), then result-button callbacks.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler())
        .branch(message_handler(deps.clone()))
        .branch(callback_handler(deps))
}

fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        |bot: Bot, msg: Message, cmd: Command| async move {
            log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);
            match cmd {
                Command::Start => handle_start_command(&bot, &msg).await,
            }
        },
    ))
}

/// Text messages: Instagram link or music query; everything else is ignored
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| msg.text().map(classify_text))
        .endpoint(move |bot: Bot, msg: Message, kind: MessageKind| {
            let deps = deps.clone();
            async move {
                match kind {
                    MessageKind::Instagram(url) => handle_instagram_link(&bot, &msg, &url, &deps).await,
                    MessageKind::Search(query) => handle_music_search(&bot, &msg, &query, &deps).await,
                    MessageKind::Ignore => Ok(()),
                }
            }
        })
}

/// `music:<key>` result buttons
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .filter_map(|q: CallbackQuery| q.data.as_deref().and_then(parse_music_callback))
        .endpoint(move |bot: Bot, q: CallbackQuery, key: String| {
            let deps = deps.clone();
            async move { handle_music_callback(&bot, &q, &key, &deps).await }
        })
}
