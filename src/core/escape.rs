//! Escaping for the two markup dialects Telegram accepts here.
//!
//! MarkdownV2 rejects a message outright on any unescaped reserved
//! character, so every piece of user or derived text (currency and date
//! strings included) must pass through before insertion.

use crate::domain::model::Dialect;

/// Backslash-prefix every MarkdownV2 reserved character and the
/// backslash itself.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '_' | '*'
                | '['
                | ']'
                | '('
                | ')'
                | '~'
                | '`'
                | '>'
                | '#'
                | '+'
                | '-'
                | '='
                | '|'
                | '{'
                | '}'
                | '.'
                | '!'
                | '\\'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape the three entities Telegram's HTML subset requires.
/// Ampersand first, so entities introduced by the other substitutions
/// are never double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_for(dialect: Dialect, text: &str) -> String {
    match dialect {
        Dialect::MarkdownV2 => escape_markdown_v2(text),
        Dialect::Html => escape_html(text),
    }
}
