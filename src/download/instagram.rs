//! Instagram download orchestration
//!
//! Walks the source chain (instaloader, then yt-dlp) until one of them leaves
//! a real file in the download directory.

use std::path::PathBuf;

use crate::download::source::SourceChain;
use crate::download::DownloadSettings;

/// Fallback-chain downloader for Instagram links.
pub struct InstagramDownloader {
    chain: SourceChain,
}

impl InstagramDownloader {
    pub fn new(chain: SourceChain) -> Self {
        Self { chain }
    }

    /// Standard chain built from settings.
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self::new(SourceChain::instagram(settings))
    }

    /// Downloads the post/reel/story behind `url`.
    ///
    /// A source result only counts when the file exists on disk. Returns
    /// `None` after every source failed; the reasons are in the log.
    pub async fn download_instagram_content(&self, url: &str) -> Option<PathBuf> {
        for source in self.chain.sources() {
            match source.fetch(url).await {
                Ok(path) if path.is_file() => {
                    log::info!("Downloaded with {}: {}", source.name(), path.display());
                    return Some(path);
                }
                Ok(path) => {
                    log::warn!(
                        "{} reported {} but the file does not exist",
                        source.name(),
                        path.display()
                    );
                }
                Err(e) => {
                    log::warn!("{} failed [{}]: {}", source.name(), e.category(), e);
                }
            }
        }

        log::error!("All download methods failed for {}", url);
        None
    }
}
