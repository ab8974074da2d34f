use std::fmt;

/// Structured error type for download operations.
///
/// Categorized variants give the orchestrator enough to decide whether the
/// next media-fetch tool is worth trying and keep log lines greppable.
#[derive(Debug)]
pub enum DownloadError {
    /// instaloader failures (bad exit code, unexpected output)
    Instaloader(String),
    /// yt-dlp failures (binary not found, bad exit code, etc.)
    YtDlp(String),
    /// ffmpeg failures (missing binary, encoding error)
    Ffmpeg(String),
    /// Expected file not found after the tool finished
    FileNotFound(String),
    /// The source requires an authenticated session
    LoginRequired(String),
    /// The post/video does not exist
    NotFound(String),
    /// Private profile the bot does not follow
    Private(String),
    /// The URL cannot be handled by this source
    Unsupported(String),
    /// Tool run timed out
    Timeout(String),
    /// Process execution failure (spawn, exit code)
    Process(String),
    /// Catch-all for uncategorized errors
    Other(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DownloadError {}

impl DownloadError {
    /// Returns subcategory for log lines
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::Instaloader(_) => "instaloader",
            DownloadError::YtDlp(_) => "ytdlp",
            DownloadError::Ffmpeg(_) => "ffmpeg",
            DownloadError::FileNotFound(_) => "file_not_found",
            DownloadError::LoginRequired(_) => "login_required",
            DownloadError::NotFound(_) => "not_found",
            DownloadError::Private(_) => "private",
            DownloadError::Unsupported(_) => "unsupported",
            DownloadError::Timeout(_) => "timeout",
            DownloadError::Process(_) => "process",
            DownloadError::Other(_) => "other",
        }
    }

    /// Returns the inner message
    pub fn message(&self) -> &str {
        match self {
            DownloadError::Instaloader(msg)
            | DownloadError::YtDlp(msg)
            | DownloadError::Ffmpeg(msg)
            | DownloadError::FileNotFound(msg)
            | DownloadError::LoginRequired(msg)
            | DownloadError::NotFound(msg)
            | DownloadError::Private(msg)
            | DownloadError::Unsupported(msg)
            | DownloadError::Timeout(msg)
            | DownloadError::Process(msg)
            | DownloadError::Other(msg) => msg,
        }
    }
}

impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        DownloadError::Other(s)
    }
}

impl From<&str> for DownloadError {
    fn from(s: &str) -> Self {
        DownloadError::Other(s.to_string())
    }
}
