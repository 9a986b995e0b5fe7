//! Utilities for sanitizing error messages.
//!
//! Removes control characters from messages before they are stored on a
//! result, and truncates them on a character boundary.

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) break
/// CSV and HTML exports and log lines; printable ASCII and all non-ASCII
/// characters are kept.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .filter(|c| *c != '\u{7f}')
        .collect()
}

/// Sanitizes a message and keeps at most `max_chars` characters of it.
///
/// Counting is done in characters, not bytes, so multi-byte text is never
/// split inside a code point. Surrounding whitespace is trimmed.
pub fn sanitize_and_truncate(message: &str, max_chars: usize) -> String {
    let sanitized = sanitize_error_message(message);
    sanitized.trim().chars().take(max_chars).collect()
}
