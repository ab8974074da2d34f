//! Locating files the external tools left in the download directory.
//!
//! Neither instaloader nor yt-dlp reliably tells us the final file name
//! (carousels get `_1`, `_2` suffixes, post-processors swap extensions), so
//! after every run we look for files by prefix.

use std::fs;
use std::path::{Path, PathBuf};

/// Media extensions in the order an Instagram download is picked up.
pub const MEDIA_EXTENSION_PRIORITY: &[&str] = &["mp4", "jpg", "jpeg", "png", "webp"];

/// Sidecar files instaloader may write next to the media.
pub const SIDECAR_EXTENSIONS: &[&str] = &["txt", "json", "xz"];

/// Extensions treated as audio when a track download falls back.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "opus", "ogg", "wav"];

/// Lists files in `dir` whose name starts with `prefix`, sorted by name.
///
/// A missing or unreadable directory yields an empty list.
pub fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Failed to read download dir {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| entry.path())
        .collect();
    found.sort();
    found
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == ext)
        .unwrap_or(false)
}

/// Finds the media file instaloader produced for a shortcode.
///
/// Looks for `<shortcode>*.<ext>` for each extension in
/// [`MEDIA_EXTENSION_PRIORITY`], then for any `<shortcode>*` file that is not
/// a sidecar.
pub fn find_media_file(dir: &Path, shortcode: &str) -> Option<PathBuf> {
    if shortcode.is_empty() {
        return None;
    }
    let candidates = files_with_prefix(dir, shortcode);

    for ext in MEDIA_EXTENSION_PRIORITY {
        if let Some(path) = candidates.iter().find(|p| has_extension(p, ext)) {
            return Some(path.clone());
        }
    }

    candidates
        .into_iter()
        .find(|p| !SIDECAR_EXTENSIONS.iter().any(|ext| has_extension(p, ext)))
}

/// Finds the audio file yt-dlp produced for a video id.
///
/// Prefers `<id>.mp3`; when the MP3 conversion did not happen, falls back to
/// any `<id>.*` audio file, then to whatever `<id>.*` exists.
pub fn find_track_file(dir: &Path, video_id: &str) -> Option<PathBuf> {
    if video_id.is_empty() {
        return None;
    }

    let mp3 = dir.join(format!("{}.mp3", video_id));
    if mp3.is_file() {
        return Some(mp3);
    }

    let candidates = files_with_prefix(dir, &format!("{}.", video_id));
    candidates
        .iter()
        .find(|p| AUDIO_EXTENSIONS.iter().any(|ext| has_extension(p, ext)))
        .cloned()
        .or_else(|| candidates.into_iter().next())
}

/// Deletes a delivered or abandoned file, logging instead of failing.
pub fn remove_file_quietly(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        log::error!("Error deleting file {}: {}", path.display(), e);
    } else {
        log::debug!("Deleted {}", path.display());
    }
}

/// Deletes everything a download left behind for `shortcode`.
///
/// Matches `<shortcode>.*` and `<shortcode>_*` (carousel items, sidecars) but
/// not longer shortcodes sharing the prefix.
pub fn remove_download_leftovers(dir: &Path, shortcode: &str) {
    if shortcode.is_empty() {
        return;
    }
    let leftovers = files_with_prefix(dir, shortcode).into_iter().filter(|path| {
        path.file_name()
            .and_then(|name| {
                name.to_string_lossy()
                    .strip_prefix(shortcode)
                    .map(|rest| rest.starts_with(['.', '_']))
            })
            .unwrap_or(false)
    });
    for path in leftovers {
        remove_file_quietly(&path);
    }
}
