//! External toolchain diagnostics
//!
//! The bot is useless without yt-dlp, instaloader and ffmpeg on the host.
//! These checks run at startup (logged) and from the `check` subcommand
//! (printed).

use std::time::Duration;

use tokio::process::Command;

use crate::core::config;
use crate::core::process::run_with_timeout;
use crate::download::music::parse_search_results;
use crate::download::DownloadSettings;

const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Query used by the search check
const PROBE_QUERY: &str = "test";

/// Version (or absence) of one external binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: &'static str,
    pub bin: String,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.version.is_some()
    }

    pub fn describe(&self) -> String {
        match &self.version {
            Some(version) => format!("✅ {}: {}", self.name, version),
            None => format!("❌ {}: not found ({})", self.name, self.bin),
        }
    }
}

/// Result of a full toolchain check
#[derive(Debug, Clone)]
pub struct ToolchainReport {
    pub ffmpeg: ToolStatus,
    pub ytdlp: ToolStatus,
    pub instaloader: ToolStatus,
    /// Whether a one-result search returned anything
    pub search_ok: bool,
}

impl ToolchainReport {
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.ffmpeg.describe(),
            self.ytdlp.describe(),
            self.instaloader.describe(),
            if self.search_ok {
                "✅ music search: working".to_string()
            } else {
                "❌ music search: no results".to_string()
            },
        ]
    }

    /// Everything needed for both features is present and search answers
    pub fn is_healthy(&self) -> bool {
        self.ffmpeg.is_available() && self.ytdlp.is_available() && self.instaloader.is_available() && self.search_ok
    }
}

/// Runs `<bin> <version_arg>` and returns the first non-empty output line.
pub async fn tool_version(bin: &str, version_arg: &str) -> Option<String> {
    let mut cmd = Command::new(bin);
    cmd.arg(version_arg);
    match run_with_timeout(&mut cmd, VERSION_CHECK_TIMEOUT).await {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string),
        Ok(output) => {
            log::debug!("{} {} exited with {}", bin, version_arg, output.status);
            None
        }
        Err(e) => {
            log::debug!("{} {} failed: {}", bin, version_arg, e);
            None
        }
    }
}

/// Single-result flat search; true when at least one entry comes back.
pub async fn check_search(settings: &DownloadSettings) -> bool {
    let mut cmd = Command::new(&settings.ytdlp_bin);
    cmd.args(["--flat-playlist", "--dump-single-json", "--quiet", "--no-warnings"])
        .arg(format!("ytsearch1:{}", PROBE_QUERY));

    match run_with_timeout(&mut cmd, settings.search_timeout).await {
        Ok(output) if output.status.success() => {
            parse_search_results(&String::from_utf8_lossy(&output.stdout))
                .map(|results| !results.is_empty())
                .unwrap_or(false)
        }
        _ => false,
    }
}

/// Checks every external binary and the search provider.
pub async fn check_toolchain(settings: &DownloadSettings) -> ToolchainReport {
    let (ffmpeg, ytdlp, instaloader, search_ok) = tokio::join!(
        tool_version(&settings.ffmpeg_bin, "-version"),
        tool_version(&settings.ytdlp_bin, "--version"),
        tool_version(&settings.instaloader_bin, "--version"),
        check_search(settings),
    );

    ToolchainReport {
        ffmpeg: ToolStatus {
            name: "ffmpeg",
            bin: settings.ffmpeg_bin.clone(),
            version: ffmpeg,
        },
        ytdlp: ToolStatus {
            name: "yt-dlp",
            bin: settings.ytdlp_bin.clone(),
            version: ytdlp,
        },
        instaloader: ToolStatus {
            name: "instaloader",
            bin: settings.instaloader_bin.clone(),
            version: instaloader,
        },
        search_ok,
    }
}

/// Logs the toolchain state at startup. Never fails; the bot still starts
/// with a partial toolchain.
pub async fn log_toolchain_diagnostics(settings: &DownloadSettings) {
    log::info!("🔧 Checking external tools (yt-dlp: {})", config::YTDL_BIN.as_str());
    let report = check_toolchain(settings).await;
    for line in report.lines() {
        if line.starts_with('❌') {
            log::warn!("{}", line);
        } else {
            log::info!("{}", line);
        }
    }
}
