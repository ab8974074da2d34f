//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::telegram::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Buyruqlar:")]
pub enum Command {
    #[command(description = "botni ishga tushirish")]
    Start,
}

/// Creates a Bot instance from BOT_TOKEN with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Token missing, invalid BOT_API_URL, or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    build_bot(config::BOT_TOKEN.as_str(), config::BOT_API_URL.as_deref())
}

/// Builds a bot for an explicit token and optional API URL.
pub fn build_bot(token: &str, api_url: Option<&str>) -> anyhow::Result<Bot> {
    if token.trim().is_empty() {
        anyhow::bail!("BOT_TOKEN is missing. Set it in the environment or in .env");
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.trim(), client);

    match api_url {
        Some(api_url) => {
            log::info!("Using custom Bot API URL: {}", api_url);
            let url = url::Url::parse(api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
