//! Command handler implementations (/start)

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::HandlerError;
use crate::telegram::texts;
use crate::telegram::Bot;

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    log::info!("/start from chat {}", msg.chat.id);
    bot.send_message(msg.chat.id, texts::START_GREETING).await?;
    Ok(())
}
