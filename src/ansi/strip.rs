//! Removal of escape sequences and unsafe control characters.
//!
//! Text pasted or typed into the buffer may carry terminal escape sequences
//! (colored `ls` output, OSC 8 hyperlinks, title-setting strings). Left in
//! place they would corrupt rendering, so they are removed before insertion.

const ESC: char = '\u{1b}';
/// 8-bit Control Sequence Introducer.
const C1_CSI: char = '\u{9b}';
const CR: char = '\r';

/// Remove ANSI escape sequences from `text`.
///
/// CSI, OSC, DCS/SOS/PM/APC strings and two-character escapes are removed
/// by the `vte` parser behind [`strip_ansi_escapes`]. The 8-bit CSI is
/// rewritten to its 7-bit form first so it is parsed the same way. An
/// unterminated sequence at the end of the input is dropped.
///
/// When sequences are present, control characters other than `\n` are
/// dropped along with them.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    if !text.contains([ESC, C1_CSI]) {
        return text.to_string();
    }
    if text.contains(C1_CSI) {
        return strip_ansi_escapes::strip_str(text.replace(C1_CSI, "\u{1b}["));
    }
    strip_ansi_escapes::strip_str(text)
}

/// Remove escape sequences, then drop control characters.
///
/// Code points `<= 31` and `127` are removed, except line feed (10) and
/// carriage return (13), which survive for later newline normalization.
#[must_use]
pub fn strip_unsafe_characters(text: &str) -> String {
    // The parser discards CR, so strip between carriage returns.
    text.split(CR)
        .map(|segment| {
            strip_ansi(segment)
                .chars()
                .filter(|&c| !is_unsafe(c))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\r")
}

#[inline]
fn is_unsafe(c: char) -> bool {
    let code = u32::from(c);
    code == 127 || (code <= 31 && code != 10 && code != 13)
}
