//! Music search and audio download through yt-dlp.
//!
//! Search uses yt-dlp's `ytsearchN:` pseudo-URL with `--flat-playlist`, so
//! only one lightweight request is made per query. Every result is stored in
//! the [`MusicCache`] under a short key that fits into callback data.

use std::path::PathBuf;

use serde::Deserialize;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppResult;
use crate::core::process::{last_stderr_line, run_with_timeout};
use crate::core::utils::format_duration;
use crate::download::files::find_track_file;
use crate::download::tool_errors::ytdlp_error;
use crate::download::DownloadSettings;
use crate::storage::cache::{short_key, CachedTrack, MusicCache};

/// Title used when the provider returns none
pub const UNKNOWN_TITLE: &str = "Noma'lum";

/// One search hit as shown on a result button
#[derive(Debug, Clone, PartialEq)]
pub struct SongResult {
    pub title: String,
    /// Canonical watch URL
    pub url: String,
    /// `m:ss`, or a dash when unknown
    pub duration: String,
    pub video_id: String,
    pub artist: String,
    /// Cache key carried in the button's callback data
    pub key: String,
}

/// A track downloaded to disk
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedTrack {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Deserialize)]
struct SearchPlaylist {
    #[serde(default)]
    entries: Vec<Option<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    id: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    channel: Option<String>,
}

/// Subset of `--dump-json` output needed after a download
#[derive(Debug, Deserialize)]
struct TrackInfo {
    id: String,
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
}

fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

fn artist_of(uploader: Option<String>, channel: Option<String>) -> String {
    uploader
        .filter(|s| !s.trim().is_empty())
        .or(channel.filter(|s| !s.trim().is_empty()))
        .unwrap_or_default()
}

/// Parses `--flat-playlist --dump-single-json` output into results.
///
/// Entries without an id cannot be downloaded later and are skipped.
pub fn parse_search_results(json: &str) -> AppResult<Vec<SongResult>> {
    let playlist: SearchPlaylist = serde_json::from_str(json)?;

    Ok(playlist
        .entries
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let video_id = entry.id.filter(|id| !id.is_empty())?;
            Some(SongResult {
                title: entry
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
                url: watch_url(&video_id),
                duration: format_duration(entry.duration),
                artist: artist_of(entry.uploader, entry.channel),
                key: short_key(&video_id),
                video_id,
            })
        })
        .collect())
}

/// Parses the first line of `--dump-json` output.
fn parse_track_info(stdout: &str) -> AppResult<TrackInfo> {
    let first_line = stdout.lines().find(|l| l.trim_start().starts_with('{')).unwrap_or("");
    Ok(serde_json::from_str(first_line)?)
}

/// Music search and download service.
#[derive(Clone)]
pub struct MusicService {
    settings: DownloadSettings,
    cache: MusicCache,
}

impl MusicService {
    pub fn new(settings: DownloadSettings, cache: MusicCache) -> Self {
        Self { settings, cache }
    }

    pub fn cache(&self) -> &MusicCache {
        &self.cache
    }

    /// Searches for up to ten tracks and caches every result.
    ///
    /// Any failure (tool missing, timeout, bad JSON) is logged and produces
    /// an empty list.
    pub async fn search_music(&self, query: &str) -> Vec<SongResult> {
        match self.run_search(query).await {
            Ok(results) => {
                for song in &results {
                    self.cache.insert(
                        song.key.clone(),
                        CachedTrack {
                            url: song.url.clone(),
                            title: song.title.clone(),
                            artist: song.artist.clone(),
                        },
                    );
                }
                log::info!("Search '{}': {} results", query, results.len());
                results
            }
            Err(e) => {
                log::error!("Search error for '{}' [{}]: {}", query, e.category(), e);
                Vec::new()
            }
        }
    }

    async fn run_search(&self, query: &str) -> AppResult<Vec<SongResult>> {
        let mut cmd = Command::new(&self.settings.ytdlp_bin);
        cmd.args(["--flat-playlist", "--dump-single-json", "--quiet", "--no-warnings"])
            .arg(format!("ytsearch{}:{}", config::search::RESULT_COUNT, query));

        let output = run_with_timeout(&mut cmd, self.settings.search_timeout).await?;
        if !output.status.success() {
            return Err(ytdlp_error(&String::from_utf8_lossy(&output.stderr)).into());
        }
        parse_search_results(&String::from_utf8_lossy(&output.stdout))
    }

    /// Downloads the best audio stream of `url` as MP3.
    ///
    /// Returns `None` when yt-dlp fails or no file can be found afterwards.
    pub async fn download_music(&self, url: &str) -> Option<DownloadedTrack> {
        match self.run_download(url).await {
            Ok(track) => {
                log::info!("Downloaded track '{}' to {}", track.title, track.path.display());
                Some(track)
            }
            Err(e) => {
                log::error!("Music download error for {} [{}]: {}", url, e.category(), e);
                None
            }
        }
    }

    async fn run_download(&self, url: &str) -> AppResult<DownloadedTrack> {
        let quality = format!("{}K", config::download::AUDIO_BITRATE_KBPS);
        let mut cmd = Command::new(&self.settings.ytdlp_bin);
        cmd.args(["-f", "bestaudio/best", "-x", "--audio-format", "mp3"])
            .arg("--audio-quality")
            .arg(&quality)
            .arg("-o")
            .arg(self.settings.output_template())
            .args(["--quiet", "--no-warnings"])
            .arg("--socket-timeout")
            .arg(config::download::SOCKET_TIMEOUT_SECS.to_string())
            .arg("--retries")
            .arg(config::download::RETRIES.to_string())
            .args(["--no-simulate", "--dump-json", "--"])
            .arg(url);

        let output = run_with_timeout(&mut cmd, self.settings.fetch_timeout).await?;
        if !output.status.success() {
            log::error!("yt-dlp audio download failed: {}", last_stderr_line(&output));
            return Err(ytdlp_error(&String::from_utf8_lossy(&output.stderr)).into());
        }

        let info = parse_track_info(&String::from_utf8_lossy(&output.stdout))?;
        let path = find_track_file(&self.settings.download_dir, &info.id).ok_or_else(|| {
            crate::download::DownloadError::FileNotFound(format!("No audio file for {}", info.id))
        })?;

        Ok(DownloadedTrack {
            path,
            title: info
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            artist: artist_of(info.uploader, info.channel),
        })
    }
}
