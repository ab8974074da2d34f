//! Download source abstraction layer.
//!
//! Provides the `DownloadSource` trait for the media-fetch backends and a
//! `SourceChain` that tries them in order. An Instagram link goes through
//! instaloader first and yt-dlp second.
//!
//! Built-in backends:
//! - `InstaloaderSource`: posts, reels and IGTV without login
//! - `YtDlpSource`: generic fallback, also handles what instaloader refuses

pub mod instaloader;
pub mod ytdlp;

use crate::core::error::AppError;
use crate::download::DownloadSettings;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for download source implementations.
///
/// A source turns a URL into a file inside the download directory.
#[async_trait]
pub trait DownloadSource: Send + Sync {
    /// Human-readable name of this source (e.g., "instaloader", "yt-dlp")
    fn name(&self) -> &str;

    /// Download the media behind `url` and return the local file path.
    async fn fetch(&self, url: &str) -> Result<PathBuf, AppError>;
}

/// Ordered list of sources; the first one producing an existing file wins.
pub struct SourceChain {
    sources: Vec<Arc<dyn DownloadSource>>,
}

impl SourceChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Append a source. Sources are tried in insertion order.
    pub fn register(&mut self, source: Arc<dyn DownloadSource>) {
        self.sources.push(source);
    }

    /// Registered sources in try order.
    pub fn sources(&self) -> &[Arc<dyn DownloadSource>] {
        &self.sources
    }

    /// instaloader first, yt-dlp as the fallback.
    pub fn instagram(settings: &DownloadSettings) -> Self {
        let mut chain = Self::new();
        chain.register(Arc::new(instaloader::InstaloaderSource::new(settings)));
        chain.register(Arc::new(ytdlp::YtDlpSource::new(settings)));
        chain
    }
}

impl Default for SourceChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instagram_chain_order() {
        let settings = DownloadSettings::new("/tmp/reelbot-test");
        let chain = SourceChain::instagram(&settings);
        let names: Vec<&str> = chain.sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["instaloader", "yt-dlp"]);
    }
}
