use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use reelbot::cli::{Cli, Commands};
use reelbot::core::classify::{classify_text, MessageKind};
use reelbot::core::toolchain::{check_toolchain, log_toolchain_diagnostics};
use reelbot::core::web_server::{start_keep_alive, start_web_server};
use reelbot::core::{config, init_logger, log_startup_configuration};
use reelbot::download::{extract_reels_audio, DownloadSettings, InstagramDownloader, MusicService};
use reelbot::storage::MusicCache;
use reelbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot creation, missing token).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        None | Some(Commands::Run) => run_bot().await,
        Some(Commands::Check) => run_check().await,
        Some(Commands::Search { query }) => run_search(&query).await,
        Some(Commands::Download { url, audio }) => run_download(&url, audio).await,
    }
}

/// Runs the bot: health server, keep-alive, long polling
async fn run_bot() -> Result<()> {
    log::info!("Starting reelbot...");
    log_startup_configuration();

    let bot = create_bot()?;

    let settings = DownloadSettings::from_config();
    settings.ensure_download_dir()?;
    log_toolchain_diagnostics(&settings).await;

    let port = *config::web::PORT;
    tokio::spawn(async move {
        if let Err(e) = start_web_server(port).await {
            log::error!("Web server error: {}", e);
        }
    });
    let _keep_alive = start_keep_alive();

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(settings, MusicCache::new());

    log::info!("Bot is running, waiting for updates");
    // Updates run concurrently; long downloads must not hold up other taps in the same chat
    Dispatcher::builder(bot, schema(deps))
        .distribution_function(|_| None::<std::convert::Infallible>)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Bot stopped");
    Ok(())
}

/// `check`: prints the toolchain state, fails when anything is missing
async fn run_check() -> Result<()> {
    let settings = DownloadSettings::from_config();
    let report = check_toolchain(&settings).await;
    for line in report.lines() {
        println!("{}", line);
    }
    if !report.is_healthy() {
        anyhow::bail!("toolchain is incomplete");
    }
    Ok(())
}

/// `search <query>`: prints results as `key  [duration]  title — artist`
async fn run_search(query: &str) -> Result<()> {
    let service = MusicService::new(DownloadSettings::from_config(), MusicCache::new());
    let songs = service.search_music(query).await;
    if songs.is_empty() {
        println!("No results");
        return Ok(());
    }
    for song in songs {
        println!("{}  [{}]  {} — {}  {}", song.key, song.duration, song.title, song.artist, song.url);
    }
    Ok(())
}

/// `download <url>`: downloads into DOWNLOAD_DIR and prints the path
async fn run_download(url: &str, audio: bool) -> Result<()> {
    let MessageKind::Instagram(url) = classify_text(url) else {
        anyhow::bail!("not an Instagram link: {}", url);
    };

    let settings = DownloadSettings::from_config();
    settings.ensure_download_dir()?;

    let downloader = InstagramDownloader::from_settings(&settings);
    let Some(path) = downloader.download_instagram_content(&url).await else {
        anyhow::bail!("all download methods failed for {}", url);
    };
    println!("{}", path.display());

    if audio {
        match extract_reels_audio(&settings, &path).await {
            Some(audio_path) => println!("{}", audio_path.display()),
            None => println!("No audio extracted"),
        }
    }
    Ok(())
}
