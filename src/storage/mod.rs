//! In-process storage: the search result cache

pub mod cache;

// Re-exports for convenience
pub use cache::{short_key, CachedTrack, MusicCache};
