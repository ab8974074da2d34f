use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::config;

/// Download target remembered between a search and the button press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTrack {
    /// Canonical watch URL
    pub url: String,
    pub title: String,
    pub artist: String,
}

/// Short key for a video id: the first [`config::search::KEY_LEN`] hex
/// characters of its SHA-256 digest.
///
/// `music:` plus the key stays well inside Telegram's 64-byte callback data
/// limit whatever the id looks like.
pub fn short_key(video_id: &str) -> String {
    let digest = Sha256::digest(video_id.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(config::search::KEY_LEN);
    key
}

/// In-memory search result cache.
///
/// Entries live for the whole process; nothing is evicted. Cloning shares
/// the same map.
#[derive(Clone, Default)]
pub struct MusicCache {
    entries: Arc<DashMap<String, CachedTrack>>,
    hit_count: Arc<AtomicU64>,
    miss_count: Arc<AtomicU64>,
}

impl MusicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or overwrites) the entry for `key`.
    pub fn insert(&self, key: String, track: CachedTrack) {
        self.entries.insert(key, track);
    }

    /// Looks up a key produced by an earlier search.
    pub fn get(&self, key: &str) -> Option<CachedTrack> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns (hits, misses) since startup
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hit_count.load(Ordering::Relaxed),
            self.miss_count.load(Ordering::Relaxed),
        )
    }
}
