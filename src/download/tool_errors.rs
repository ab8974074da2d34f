//! Reading failure reasons out of instaloader / yt-dlp / ffmpeg stderr.
//!
//! The tools only report problems as text, so the categories here are
//! substring heuristics over lowercased stderr.

use crate::download::error::DownloadError;

/// Failure categories shared by the media-fetch tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolErrorType {
    /// The content needs a logged-in session (stories, age-gated posts)
    LoginRequired,
    /// The post or video does not exist (deleted, wrong shortcode)
    NotFound,
    /// Private profile not followed by the session
    PrivateProfile,
    /// ffmpeg / ffprobe is missing, post-processing impossible
    FfmpegMissing,
    /// Timeouts, DNS, connection resets, rate limiting
    NetworkError,
    /// Anything else
    Unknown,
}

/// Classifies tool stderr into a [`ToolErrorType`].
pub fn analyze_tool_error(stderr: &str) -> ToolErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("ffmpeg not found")
        || stderr_lower.contains("ffprobe and ffmpeg not found")
        || stderr_lower.contains("ffmpeg is not installed")
        || (stderr_lower.contains("ffmpeg") && stderr_lower.contains("not found"))
    {
        return ToolErrorType::FfmpegMissing;
    }

    if stderr_lower.contains("private profile")
        || stderr_lower.contains("profile is private")
        || stderr_lower.contains("privateprofilenotfollowedexception")
    {
        return ToolErrorType::PrivateProfile;
    }

    if stderr_lower.contains("login required")
        || stderr_lower.contains("login_required")
        || stderr_lower.contains("loginrequiredexception")
        || stderr_lower.contains("requested content is not available, rate-limit reached or login required")
        || stderr_lower.contains("use --cookies")
    {
        return ToolErrorType::LoginRequired;
    }

    if stderr_lower.contains("does not exist")
        || stderr_lower.contains("not found")
        || stderr_lower.contains("http error 404")
        || stderr_lower.contains("queryreturnednotfoundexception")
        || stderr_lower.contains("video unavailable")
    {
        return ToolErrorType::NotFound;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("http error 429")
        || stderr_lower.contains("too many requests")
    {
        return ToolErrorType::NetworkError;
    }

    ToolErrorType::Unknown
}

/// Maps a classified instaloader failure to a [`DownloadError`].
pub fn instaloader_error(stderr: &str, url: &str) -> DownloadError {
    match analyze_tool_error(stderr) {
        ToolErrorType::LoginRequired => DownloadError::LoginRequired(format!("Login required: {}", url)),
        ToolErrorType::NotFound => DownloadError::NotFound(format!("Post not found: {}", url)),
        ToolErrorType::PrivateProfile => DownloadError::Private(format!("Private profile: {}", url)),
        _ => DownloadError::Instaloader(summarize(stderr)),
    }
}

/// Maps a classified yt-dlp failure to a [`DownloadError`].
pub fn ytdlp_error(stderr: &str) -> DownloadError {
    match analyze_tool_error(stderr) {
        ToolErrorType::FfmpegMissing => DownloadError::Ffmpeg("FFmpeg not found".to_string()),
        _ => DownloadError::YtDlp(summarize(stderr)),
    }
}

/// First `ERROR:` line of stderr, else the last non-empty line.
fn summarize(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .iter()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.to_string())
        .unwrap_or_else(|| "no error output".to_string())
}
