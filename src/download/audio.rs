//! Soundtrack extraction from downloaded reels

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::core::config;
use crate::core::process::{last_stderr_line, run_with_timeout};
use crate::download::error::DownloadError;
use crate::download::DownloadSettings;

/// `<dir>/<stem>_audio.mp3` next to the video.
pub fn audio_path_for(video: &Path) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    video.with_file_name(format!("{}_audio.mp3", stem))
}

/// Extracts the audio track of `video` into an MP3 file.
///
/// Returns the MP3 path only when ffmpeg actually produced it. Failures are
/// logged and yield `None`; a missing ffmpeg gets its own log line so the
/// deployment problem is obvious.
pub async fn extract_reels_audio(settings: &DownloadSettings, video: &Path) -> Option<PathBuf> {
    let audio = audio_path_for(video);
    let bitrate = format!("{}k", config::download::AUDIO_BITRATE_KBPS);

    let mut cmd = Command::new(&settings.ffmpeg_bin);
    cmd.arg("-y")
        .args(["-loglevel", "error"])
        .arg("-i")
        .arg(video)
        .arg("-vn")
        .args(["-acodec", "libmp3lame"])
        .arg("-b:a")
        .arg(&bitrate)
        .arg(&audio);

    match run_with_timeout(&mut cmd, settings.ffmpeg_timeout).await {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            log::error!("ffmpeg audio extraction failed: {}", last_stderr_line(&output));
        }
        Err(DownloadError::Process(msg)) if msg.contains("not found") => {
            log::error!("ffmpeg is not installed, cannot extract audio: {}", msg);
            return None;
        }
        Err(e) => {
            log::error!("Audio extraction error [{}]: {}", e.subcategory(), e);
        }
    }

    if audio.is_file() {
        log::info!("Extracted audio: {}", audio.display());
        Some(audio)
    } else {
        None
    }
}
