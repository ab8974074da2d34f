use thiserror::Error;

use crate::download::error::DownloadError;

/// Centralized error types for the application
///
/// All errors in the application are converted to this enum for consistent error handling.
/// Uses `thiserror` for automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use reelbot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Download/instaloader/yt-dlp/ffmpeg errors
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// HTTP errors (keep-alive pings)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON from an external tool
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Short category label used in log lines
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Telegram(_) => "telegram",
            AppError::Download(e) => e.subcategory(),
            AppError::Http(_) => "http",
            AppError::Io(_) => "io",
            AppError::Json(_) => "json",
        }
    }
}
