//! Handler types and dependencies

use std::sync::Arc;

use crate::download::{DownloadSettings, InstagramDownloader, MusicService};
use crate::storage::cache::MusicCache;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub settings: Arc<DownloadSettings>,
    pub instagram: Arc<InstagramDownloader>,
    pub music: MusicService,
}

impl HandlerDeps {
    /// Create handler dependencies with the standard Instagram source chain
    pub fn new(settings: DownloadSettings, cache: MusicCache) -> Self {
        let instagram = Arc::new(InstagramDownloader::from_settings(&settings));
        let music = MusicService::new(settings.clone(), cache);
        Self {
            settings: Arc::new(settings),
            instagram,
            music,
        }
    }
}
