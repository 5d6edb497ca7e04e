// src/data/sanitize.rs

//! Escape message content so it cannot disrupt a single line of terminal
//! output.
//!
//! Escapes all ASCII control codes, including newline, hard tab, and
//! escape (which does terminal colors). Escapes the weird Unicode ways to
//! do newlines (U+0085, U+2028, U+2029) since those would disrupt the
//! line-oriented output. Escapes `"` so messages end up looking like
//! string-literal contents (copy-paste friendly). Does _not_ escape `'`,
//! because --> that's <-- common in messages and would be distracting.
//! Escapes `{`, because that character starts the args part of the line.

use std::borrow::Cow;

/// must `c` be escaped before printing?
const fn char_is_disallowed(c: char) -> bool {
    matches!(
        c,
        '\x00'..='\x1f' | '\x7f' | '\u{0085}' | '\u{2028}' | '\u{2029}' | '"' | '\\' | '{'
    )
}

/// Make sure there are no newlines or other terminal characters in
/// `message` that could cause problems when printed in a line of terminal
/// output.
///
/// This runs on every displayed line, so the common case — no disallowed
/// character at all — returns the input borrowed, with zero allocation.
///
/// Not idempotent: sanitizing already-sanitized output escapes the
/// backslashes again.
pub fn sanitize_message(message: &str) -> Cow<'_, str> {
    if !message.chars().any(char_is_disallowed) {
        return Cow::Borrowed(message);
    }

    let mut sanitized = String::with_capacity(message.len() + 8);
    for c in message.chars() {
        match c {
            '"' => sanitized.push_str("\\\""),
            // hex-escaped, distinct from a plain backslash escape, so a
            // sanitized `{` can never be confused with legitimate
            // backslash content preceding the args part of the line
            '{' => sanitized.push_str("\\x7b"),
            '\\' => sanitized.push_str("\\\\"),
            '\n' => sanitized.push_str("\\n"),
            '\r' => sanitized.push_str("\\r"),
            '\t' => sanitized.push_str("\\t"),
            '\u{2028}' => sanitized.push_str("\\u2028"),
            '\u{2029}' => sanitized.push_str("\\u2029"),
            c if char_is_disallowed(c) => {
                // the remaining control codes and U+0085 fit `\xNN` notation
                sanitized.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => sanitized.push(c),
        }
    }

    Cow::Owned(sanitized)
}
