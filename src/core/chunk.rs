//! Splits an over-length message at line boundaries so every part fits
//! Telegram's per-message cap.

/// Safe per-chunk size, with margin under the Bot API's 4096-char cap.
pub const TELEGRAM_SAFE_LIMIT: usize = 4000;

/// Split `text` into ordered chunks of at most `limit` chars.
///
/// Cuts at the last newline at or before position `limit`; the newline
/// stays at the head of the remainder, so concatenating the chunks
/// reproduces the input exactly. A line longer than the window is cut
/// mid-line at `limit`. Counting is in chars, which keeps every cut on
/// a UTF-8 boundary.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 || text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut rest = text;
    while rest.chars().count() > limit {
        let window_end = floor_char_offset(rest, limit + 1);
        let cut = match rest[..window_end].rfind('\n') {
            // A cut at 0 (leading newline, nothing else in the window)
            // would emit an empty chunk and never advance.
            Some(i) if i > 0 => i,
            _ => floor_char_offset(rest, limit),
        };
        parts.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    parts.push(rest.to_string());
    parts
}

/// Byte offset of char number `nchars`, or the end of the string.
fn floor_char_offset(s: &str, nchars: usize) -> usize {
    s.char_indices().nth(nchars).map_or(s.len(), |(i, _)| i)
}
