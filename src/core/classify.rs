//! Incoming text classification
//!
//! Decides whether a message is an Instagram link, a music search query, or
//! something the bot stays silent on. Everything is regex/substring based; no
//! network lookups happen here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config;

/// What the bot should do with a text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Download the Instagram post/reel/story behind this URL
    Instagram(String),
    /// Search music with this query
    Search(String),
    /// Too short, a command, or otherwise not for us
    Ignore,
}

/// Cached regex for pulling an Instagram URL out of a longer message
/// Compiled once at startup and reused for all requests
static INSTAGRAM_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:[a-z0-9-]+\.)*instagram\.com/\S*").expect("Failed to compile Instagram URL regex")
});

/// Shortcode patterns, tried in order
static SHORTCODE_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"instagram\.com/p/([A-Za-z0-9_-]+)",
        r"instagram\.com/reel/([A-Za-z0-9_-]+)",
        r"instagram\.com/reels/([A-Za-z0-9_-]+)",
        r"instagram\.com/tv/([A-Za-z0-9_-]+)",
        r"instagram\.com/stories/[^/]+/(\d+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Failed to compile shortcode regex"))
    .collect()
});

/// Classifies a text message.
///
/// # Example
///
/// ```
/// use reelbot::core::classify::{classify_text, MessageKind};
///
/// assert_eq!(
///     classify_text("https://www.instagram.com/reel/Cx1abc/"),
///     MessageKind::Instagram("https://www.instagram.com/reel/Cx1abc/".to_string())
/// );
/// assert_eq!(classify_text("Shahzoda"), MessageKind::Search("Shahzoda".to_string()));
/// assert_eq!(classify_text("/help"), MessageKind::Ignore);
/// ```
pub fn classify_text(text: &str) -> MessageKind {
    let trimmed = text.trim();

    if trimmed.contains("instagram.com") {
        let url = INSTAGRAM_URL_REGEX
            .find(trimmed)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| trimmed.to_string());
        return MessageKind::Instagram(url);
    }

    if trimmed.chars().count() < config::search::MIN_QUERY_CHARS {
        return MessageKind::Ignore;
    }

    if trimmed.starts_with('/') {
        return MessageKind::Ignore;
    }

    MessageKind::Search(trimmed.to_string())
}

/// Extracts the post shortcode (or story media id) from an Instagram URL.
pub fn extract_shortcode(url: &str) -> Option<String> {
    SHORTCODE_REGEXES
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Story links need a logged-in session.
pub fn is_story(url: &str) -> bool {
    url.contains("/stories/")
}
