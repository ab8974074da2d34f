//! InstaloaderSource: primary Instagram backend.
//!
//! Downloads a single post, reel or IGTV video by shortcode. Stories need a
//! logged-in session, which the bot does not keep, so they are left to the
//! yt-dlp fallback.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::classify::{extract_shortcode, is_story};
use crate::core::error::AppError;
use crate::core::process::{last_stderr_line, run_with_timeout};
use crate::download::error::DownloadError;
use crate::download::files::find_media_file;
use crate::download::source::DownloadSource;
use crate::download::tool_errors::instaloader_error;
use crate::download::DownloadSettings;

/// Download source powered by the instaloader CLI.
pub struct InstaloaderSource {
    bin: String,
    download_dir: PathBuf,
    timeout: Duration,
}

impl InstaloaderSource {
    pub fn new(settings: &DownloadSettings) -> Self {
        Self {
            bin: settings.instaloader_bin.clone(),
            download_dir: settings.download_dir.clone(),
            timeout: settings.fetch_timeout,
        }
    }

    /// Command-line arguments for one shortcode.
    ///
    /// The leading `-` before the shortcode is instaloader's syntax for
    /// "single post"; `--` keeps shortcodes starting with `-` from being
    /// read as flags.
    fn build_args(&self, shortcode: &str) -> Vec<String> {
        vec![
            "--dirname-pattern".to_string(),
            self.download_dir.to_string_lossy().to_string(),
            "--filename-pattern".to_string(),
            "{shortcode}".to_string(),
            "--no-video-thumbnails".to_string(),
            "--no-geotags".to_string(),
            "--no-comments".to_string(),
            "--no-metadata-json".to_string(),
            "--no-compress-json".to_string(),
            "--no-captions".to_string(),
            "--quiet".to_string(),
            "--".to_string(),
            format!("-{}", shortcode),
        ]
    }
}

#[async_trait]
impl DownloadSource for InstaloaderSource {
    fn name(&self) -> &str {
        "instaloader"
    }

    async fn fetch(&self, url: &str) -> Result<PathBuf, AppError> {
        if is_story(url) {
            log::info!("Story link, instaloader needs login: {}", url);
            return Err(DownloadError::LoginRequired(format!("Stories require login: {}", url)).into());
        }

        let shortcode = extract_shortcode(url)
            .ok_or_else(|| DownloadError::Unsupported(format!("No shortcode in URL: {}", url)))?;
        log::info!("Downloading with instaloader: {} (shortcode {})", url, shortcode);

        let mut cmd = Command::new(&self.bin);
        cmd.args(self.build_args(&shortcode));
        let output = run_with_timeout(&mut cmd, self.timeout).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = instaloader_error(&stderr, url);
            match &err {
                DownloadError::LoginRequired(_) => log::warn!("Instaloader: login required for {}", url),
                DownloadError::NotFound(_) => log::warn!("Instaloader: post not found {}", url),
                DownloadError::Private(_) => log::warn!("Instaloader: private profile {}", url),
                _ => log::error!(
                    "Instaloader failed ({}): {}",
                    output.status,
                    last_stderr_line(&output)
                ),
            }
            return Err(err.into());
        }

        // instaloader exits 0 for some soft failures, so the file is the real signal
        find_media_file(&self.download_dir, &shortcode).ok_or_else(|| {
            DownloadError::FileNotFound(format!("Instaloader produced no media for {}", shortcode)).into()
        })
    }
}
