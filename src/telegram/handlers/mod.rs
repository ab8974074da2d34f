//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The handlers are organized in a testable way, allowing integration tests
//! to use the same handler tree as production code.

mod commands;
mod instagram;
mod music;
mod schema;
mod types;

pub use instagram::handle_instagram_link;
pub use music::{handle_music_callback, handle_music_search, music_callback_data, parse_music_callback};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
