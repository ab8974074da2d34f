//! reelbot - Telegram bot for Instagram downloads and music search
//!
//! The bot forwards Instagram links to instaloader (with yt-dlp as the
//! fallback), searches music through yt-dlp, and sends the resulting files
//! back through the Bot API. A small HTTP server answers health checks.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, classification, web server
//! - `download`: external tool orchestration and file discovery
//! - `storage`: the in-memory search result cache
//! - `telegram`: bot creation, dispatcher schema, and delivery

pub mod cli;
pub mod core;
pub mod download;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use download::{DownloadSettings, InstagramDownloader, MusicService};
pub use storage::MusicCache;
pub use telegram::{create_bot, schema, HandlerDeps};
