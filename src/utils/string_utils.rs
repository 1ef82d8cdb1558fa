//! UTF-8-safe string truncation
//!
//! Snippets are cut by character count so that multi-byte text (Cyrillic,
//! CJK, emoji) never gets split inside a code point.

/// Truncate a string to at most `max_chars` CHARACTERS (not bytes).
///
/// Never panics and never allocates: the result is a slice of `s` ending on
/// a char boundary, or `s` itself when it is already short enough.
///
/// # Examples
/// ```
/// # use kodegen_tools_docsearch::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
///
/// // Cyrillic letters are 2 bytes each
/// assert_eq!(safe_truncate_chars("Обзор движка", 5), "Обзор");
///
/// // Emoji (4 bytes each)
/// assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
///
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}
