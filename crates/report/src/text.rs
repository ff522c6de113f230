//! Text shaping helpers shared by the block builder and the summarizer

/// Notion rejects rich-text content longer than this
pub const RICH_TEXT_MAX: usize = 2000;

const ELLIPSIS: char = '…';

/// Shorten `text` to exactly `max` characters, the last being an ellipsis.
/// Text at or under the limit is returned unchanged.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// First `max` characters of `text`, without any marker
pub fn prefix(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `500` -> `"500ms"`, `2500` -> `"2.5s"`
pub fn format_duration(duration_ms: u64) -> String {
    if duration_ms < 1000 {
        format!("{}ms", duration_ms)
    } else {
        format!("{:.1}s", duration_ms as f64 / 1000.0)
    }
}
