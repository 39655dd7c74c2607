//! Terminal column widths.
//!
//! Layout measures in columns while the buffer addresses code points, so a
//! wide CJK character is one column of the cursor but two cells of the
//! viewport. Combining marks and controls occupy no cells.

use unicode_width::UnicodeWidthChar;

/// How East Asian ambiguous-width characters (`①`, `±`, box drawing) are
/// counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// One column, as `wcwidth(3)` reports in most locales.
    #[default]
    WcWidth,
    /// Two columns, matching terminals configured for CJK.
    Unicode,
}

#[must_use]
pub fn display_width(s: &str) -> usize {
    display_width_with_method(s, WidthMethod::default())
}

#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    display_width_char_with_method(c, WidthMethod::default())
}

/// Columns occupied by `s`. Control characters count as zero.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    s.chars().map(|c| display_width_char_with_method(c, method)).sum()
}

/// Columns occupied by `c`: 0, 1 or 2.
#[inline]
#[must_use]
pub fn display_width_char_with_method(c: char, method: WidthMethod) -> usize {
    match c {
        ' '..='~' => 1,
        '\0'..='\u{1f}' | '\u{7f}' => 0,
        _ if method == WidthMethod::Unicode => c.width_cjk().unwrap_or(0),
        _ => c.width().unwrap_or(0),
    }
}
