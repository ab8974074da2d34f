use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

// Configuration constants for the bot

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Directory where every downloaded file lands before delivery
/// Read from DOWNLOAD_DIR environment variable
/// Default: downloads
pub static DOWNLOAD_DIR: Lazy<String> =
    Lazy::new(|| env::var("DOWNLOAD_DIR").unwrap_or_else(|_| "downloads".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// instaloader binary path (INSTALOADER_BIN, default "instaloader")
pub static INSTALOADER_BIN: Lazy<String> =
    Lazy::new(|| env::var("INSTALOADER_BIN").unwrap_or_else(|_| "instaloader".to_string()));

/// ffmpeg binary path (FFMPEG_BIN, default "ffmpeg")
pub static FFMPEG_BIN: Lazy<String> = Lazy::new(|| env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()));

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Health-check web server configuration
pub mod web {
    use once_cell::sync::Lazy;
    use std::env;

    /// Default port when PORT is unset or invalid
    pub const DEFAULT_PORT: u16 = 10000;

    /// Port for the health-check server
    /// Read from PORT environment variable (set by the hosting platform)
    pub static PORT: Lazy<u16> = Lazy::new(|| parse_port(env::var("PORT").ok().as_deref()));

    pub(crate) fn parse_port(raw: Option<&str>) -> u16 {
        raw.and_then(|v| v.trim().parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
    }
}

/// Keep-alive self-ping configuration
pub mod keep_alive {
    use super::Duration;
    use once_cell::sync::Lazy;

    /// Public URL of this service; keep-alive is disabled when unset
    /// Read from RENDER_EXTERNAL_URL environment variable
    pub static EXTERNAL_URL: Lazy<Option<String>> = Lazy::new(|| super::non_empty_var("RENDER_EXTERNAL_URL"));

    /// Delay before the first ping (in seconds)
    pub const INITIAL_DELAY_SECS: u64 = 60;

    /// Interval between pings (in seconds)
    pub const INTERVAL_SECS: u64 = 300;

    pub fn initial_delay() -> Duration {
        Duration::from_secs(INITIAL_DELAY_SECS)
    }

    pub fn interval() -> Duration {
        Duration::from_secs(INTERVAL_SECS)
    }
}

/// Download configuration
pub mod download {
    use super::Duration;

    /// Socket timeout passed to yt-dlp (in seconds)
    pub const SOCKET_TIMEOUT_SECS: u64 = 30;

    /// Retry count passed to yt-dlp
    pub const RETRIES: u32 = 3;

    /// Audio quality for MP3 extraction (kbit/s)
    pub const AUDIO_BITRATE_KBPS: u32 = 128;

    /// Browser user agent sent by yt-dlp for Instagram
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    /// Timeout for a single yt-dlp / instaloader run (in seconds)
    pub const FETCH_TIMEOUT_SECS: u64 = 240;

    /// Timeout for ffmpeg audio extraction (in seconds)
    pub const FFMPEG_TIMEOUT_SECS: u64 = 120;

    pub fn fetch_timeout() -> Duration {
        Duration::from_secs(FETCH_TIMEOUT_SECS)
    }

    pub fn ffmpeg_timeout() -> Duration {
        Duration::from_secs(FFMPEG_TIMEOUT_SECS)
    }
}

/// Music search configuration
pub mod search {
    use super::Duration;

    /// Number of results requested from the search provider
    pub const RESULT_COUNT: usize = 10;

    /// Length of the short callback key (hex characters)
    pub const KEY_LEN: usize = 10;

    /// Maximum title length shown on a result button
    pub const BUTTON_TITLE_MAX_CHARS: usize = 45;

    /// Maximum title length shown in the "downloading" notice
    pub const NOTICE_TITLE_MAX_CHARS: usize = 50;

    /// Minimum query length (in characters)
    pub const MIN_QUERY_CHARS: usize = 2;

    /// Timeout for a search request (in seconds)
    pub const TIMEOUT_SECS: u64 = 60;

    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API HTTP requests (in seconds)
    /// Uploads of large videos need a generous budget
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Timeout for keep-alive pings (in seconds)
    pub const PING_TIMEOUT_SECS: u64 = 30;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }

    pub fn ping_timeout() -> Duration {
        Duration::from_secs(PING_TIMEOUT_SECS)
    }
}
