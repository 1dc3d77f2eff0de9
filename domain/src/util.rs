//! Shared utility functions.

use std::borrow::Cow;

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of a message for log output: truncated to
/// `max_bytes` with a trailing ellipsis, newlines flattened to spaces.
pub fn preview(s: &str, max_bytes: usize) -> Cow<'_, str> {
    let truncated = truncate_str(s, max_bytes);
    if truncated.len() == s.len() && !truncated.contains('\n') {
        return Cow::Borrowed(truncated);
    }
    let mut line = truncated.replace('\n', " ");
    if truncated.len() < s.len() {
        line.push('…');
    }
    Cow::Owned(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'の' is 3 bytes (U+306E): bytes 0xe3 0x81 0xae
        let s = "あのね"; // 9 bytes: 3+3+3
        // Cutting at byte 4 would land inside 'の', should back up to 3
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn preview_marks_truncation() {
        assert_eq!(preview("hello world", 5), "hello…");
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_flattens_newlines() {
        assert_eq!(preview("a\nb\nc", 10), "a b c");
    }
}
