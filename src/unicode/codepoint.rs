//! Code-point addressing for buffer text.
//!
//! Cursor columns count Unicode scalar values, never bytes. A character
//! outside the Basic Multilingual Plane (most emoji) is exactly one position.
//! All index arguments clamp to the string length instead of panicking.

/// Number of code points in `s`.
#[inline]
#[must_use]
pub fn cp_len(s: &str) -> usize {
    if s.is_ascii() {
        s.len()
    } else {
        s.chars().count()
    }
}

/// Collect the code points of `s`.
#[must_use]
pub fn to_code_points(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Byte index of code point `col` in `s`, clamped to `s.len()`.
#[must_use]
pub fn cp_byte_offset(s: &str, col: usize) -> usize {
    if s.is_ascii() {
        return col.min(s.len());
    }
    s.char_indices().nth(col).map_or(s.len(), |(idx, _)| idx)
}

/// Code points `start..end` of `s`.
///
/// `end` is clamped to the length; an inverted range yields `""`.
#[must_use]
pub fn cp_slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = cp_byte_offset(s, start);
    let end_byte = cp_byte_offset(s, end).max(start_byte);
    &s[start_byte..end_byte]
}

/// Code points from `start` to the end of `s`.
#[must_use]
pub fn cp_slice_from(s: &str, start: usize) -> &str {
    &s[cp_byte_offset(s, start)..]
}

/// Word characters are everything except whitespace and `. , ; ! ?`.
#[inline]
#[must_use]
pub fn is_word_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, ',' | '.' | ';' | '!' | '?'))
}
