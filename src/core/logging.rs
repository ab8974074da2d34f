//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup diagnostics for the environment-driven configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
///
/// Never prints the bot token itself, only whether it is present.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_empty() {
        log::error!("❌ BOT_TOKEN: not set");
    } else {
        log::info!("✅ BOT_TOKEN: set");
    }

    match config::BOT_API_URL.as_deref() {
        Some(url) => log::info!("✅ BOT_API_URL: {}", url),
        None => log::info!("   BOT_API_URL: default (api.telegram.org)"),
    }

    log::info!("   DOWNLOAD_DIR: {}", config::DOWNLOAD_DIR.as_str());
    log::info!("   YTDL_BIN: {}", config::YTDL_BIN.as_str());
    log::info!("   INSTALOADER_BIN: {}", config::INSTALOADER_BIN.as_str());
    log::info!("   FFMPEG_BIN: {}", config::FFMPEG_BIN.as_str());
    log::info!("   PORT: {}", *config::web::PORT);

    match config::keep_alive::EXTERNAL_URL.as_deref() {
        Some(url) => log::info!("✅ RENDER_EXTERNAL_URL: {} (keep-alive enabled)", url),
        None => log::warn!("⚠️  RENDER_EXTERNAL_URL: not set (keep-alive disabled)"),
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
