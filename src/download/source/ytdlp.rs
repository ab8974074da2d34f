//! YtDlpSource: fallback Instagram backend.
//!
//! yt-dlp handles stories and the odd post layout instaloader chokes on. It
//! prints the final file path after post-processing, which is preferred over
//! guessing the extension.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppError;
use crate::core::process::{last_stderr_line, run_with_timeout};
use crate::download::error::DownloadError;
use crate::download::source::DownloadSource;
use crate::download::tool_errors::ytdlp_error;
use crate::download::DownloadSettings;

/// Download source powered by the yt-dlp CLI.
pub struct YtDlpSource {
    bin: String,
    output_template: String,
    timeout: Duration,
}

impl YtDlpSource {
    pub fn new(settings: &DownloadSettings) -> Self {
        Self {
            bin: settings.ytdlp_bin.clone(),
            output_template: settings.output_template(),
            timeout: settings.fetch_timeout,
        }
    }

    fn build_args(&self, url: &str) -> Vec<String> {
        vec![
            "-o".to_string(),
            self.output_template.clone(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "-f".to_string(),
            "best".to_string(),
            "--socket-timeout".to_string(),
            config::download::SOCKET_TIMEOUT_SECS.to_string(),
            "--retries".to_string(),
            config::download::RETRIES.to_string(),
            "--add-header".to_string(),
            format!("User-Agent:{}", config::download::USER_AGENT),
            "--no-simulate".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }
}

/// First printed path that exists on disk.
fn printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

#[async_trait]
impl DownloadSource for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(&self, url: &str) -> Result<PathBuf, AppError> {
        log::info!("Downloading with yt-dlp: {}", url);

        let mut cmd = Command::new(&self.bin);
        cmd.args(self.build_args(url));
        let output = run_with_timeout(&mut cmd, self.timeout).await?;

        if !output.status.success() {
            log::error!("yt-dlp failed ({}): {}", output.status, last_stderr_line(&output));
            return Err(ytdlp_error(&String::from_utf8_lossy(&output.stderr)).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        printed_path(&stdout).ok_or_else(|| {
            DownloadError::FileNotFound(format!("yt-dlp reported no existing file for {}", url)).into()
        })
    }
}
