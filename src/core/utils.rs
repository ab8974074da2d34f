/// Escapes special characters for Telegram's MarkdownV2 format.
///
/// MarkdownV2 requires escaping:
/// `_`, `*`, `[`, `]`, `(`, `)`, `~`, `` ` ``, `>`, `#`, `+`, `-`, `=`, `|`, `{`, `}`, `.`, `!`
///
/// The backslash itself is escaped first so nothing is double-escaped.
///
/// # Example
///
/// ```
/// use reelbot::core::utils::escape_markdown_v2;
///
/// let escaped = escape_markdown_v2("Hello. World!");
/// assert_eq!(escaped, "Hello\\. World\\!");
/// ```
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{' | '}' | '.'
            | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Truncates a string to at most `max_chars` characters.
///
/// Counts `char`s, not bytes, so titles in any script never split a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Formats a track duration as `m:ss`.
///
/// Unknown or zero durations render as an em dash, matching what users see
/// on the result buttons.
///
/// # Example
///
/// ```
/// use reelbot::core::utils::format_duration;
///
/// assert_eq!(format_duration(Some(245.0)), "4:05");
/// assert_eq!(format_duration(None), "—");
/// ```
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(secs) if secs >= 1.0 => {
            let total = secs as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "—".to_string(),
    }
}
