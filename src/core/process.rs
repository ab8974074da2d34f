//! Process execution utilities with timeout support
//!
//! Every media-fetch tool (instaloader, yt-dlp, ffmpeg) is an external
//! process. Running them through `tokio::process` keeps the dispatcher
//! responsive, and the timeout keeps a hung tool from pinning a handler.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::download::error::DownloadError;

/// Run an async Command with a timeout.
///
/// The child is killed when the timeout fires. A binary that cannot be spawned
/// maps to `DownloadError::Process`, a timeout to `DownloadError::Timeout`.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, DownloadError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => {
            let program = cmd.as_std().get_program().to_string_lossy().to_string();
            if e.kind() == std::io::ErrorKind::NotFound {
                Err(DownloadError::Process(format!("{} not found in PATH", program)))
            } else {
                Err(DownloadError::Process(format!("Failed to spawn {}: {}", program, e)))
            }
        }
        Err(_) => Err(DownloadError::Timeout(format!(
            "Process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// Last non-empty stderr line, for compact log messages.
pub fn last_stderr_line(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no stderr output")
        .to_string()
}
