//! Download management: media-fetch sources, the Instagram fallback chain,
//! music search/download and audio extraction.

pub mod audio;
pub mod error;
pub mod files;
pub mod instagram;
pub mod music;
pub mod source;
pub mod tool_errors;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::config;

// Re-exports for convenience
pub use audio::extract_reels_audio;
pub use error::DownloadError;
pub use instagram::InstagramDownloader;
pub use music::{DownloadedTrack, MusicService, SongResult};

/// Where files land and which binaries produce them.
///
/// Built from the environment in production; tests point it at a temp
/// directory and fake binaries.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub download_dir: PathBuf,
    pub ytdlp_bin: String,
    pub instaloader_bin: String,
    pub ffmpeg_bin: String,
    pub fetch_timeout: Duration,
    pub ffmpeg_timeout: Duration,
    pub search_timeout: Duration,
}

impl DownloadSettings {
    /// Settings with the configured binaries and a custom download directory.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            ytdlp_bin: config::YTDL_BIN.clone(),
            instaloader_bin: config::INSTALOADER_BIN.clone(),
            ffmpeg_bin: config::FFMPEG_BIN.clone(),
            fetch_timeout: config::download::fetch_timeout(),
            ffmpeg_timeout: config::download::ffmpeg_timeout(),
            search_timeout: config::search::timeout(),
        }
    }

    /// Settings read entirely from the environment.
    pub fn from_config() -> Self {
        Self::new(config::DOWNLOAD_DIR.as_str())
    }

    /// Creates the download directory if it does not exist yet.
    pub fn ensure_download_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.download_dir)
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// yt-dlp output template: `<dir>/%(id)s.%(ext)s`
    pub fn output_template(&self) -> String {
        self.download_dir.join("%(id)s.%(ext)s").to_string_lossy().to_string()
    }
}
