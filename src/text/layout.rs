//! Word-wrapped visual layout.
//!
//! [`compute_layout`] turns logical lines into visual lines no wider than the
//! viewport, together with maps between logical `(row, col)` and visual
//! `(row, col)` positions. Columns on both sides are code-point offsets;
//! display width only decides where lines break.
//!
//! # Wrapping rules
//!
//! Code points are accumulated until the next one would overflow the width.
//! The chunk then ends just before the most recent space inside it, or at the
//! current code point if there is none. A space that directly follows a chunk
//! is consumed by the break and does not start the next visual line. A code
//! point wider than the whole viewport gets a visual line of its own, which
//! also guarantees progress for a zero width.
//!
//! ```
//! use promptbuf::text::compute_layout;
//!
//! let lines = vec!["The quick brown fox".to_string()];
//! let layout = compute_layout(&lines, (0, 0), 10);
//! assert_eq!(layout.visual_lines, vec!["The quick", "brown fox"]);
//! ```

use crate::unicode::{WidthMethod, cp_len, cp_slice, display_width_char_with_method};

/// A logical or visual position: `(row, code-point column)`.
pub type Position = (usize, usize);

/// Visual lines plus the maps between logical and visual coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisualLayout {
    /// Wrapped lines, top to bottom.
    pub visual_lines: Vec<String>,
    /// For each logical row, `(visual_row, logical_start_col)` of every chunk.
    pub logical_to_visual: Vec<Vec<Position>>,
    /// For each visual row, `(logical_row, logical_start_col)`.
    pub visual_to_logical: Vec<Position>,
    /// Visual position of the logical cursor.
    pub visual_cursor: Position,
    logical_lens: Vec<usize>,
}

impl VisualLayout {
    /// Number of visual lines.
    #[must_use]
    pub fn visual_line_count(&self) -> usize {
        self.visual_lines.len()
    }

    /// Code-point length of a visual line, or 0 if out of range.
    #[must_use]
    pub fn visual_line_len(&self, visual_row: usize) -> usize {
        self.visual_lines
            .get(visual_row)
            .map_or(0, |line| cp_len(line))
    }

    /// Map a logical position to its visual position.
    ///
    /// A position at the end of a chunk maps to the end of that visual line
    /// unless the following chunk starts there. The end of a logical line maps
    /// to the end of its last chunk. Returns `None` for positions outside the
    /// document.
    #[must_use]
    pub fn to_visual(&self, row: usize, col: usize) -> Option<Position> {
        let chunks = self.logical_to_visual.get(row)?;
        let line_len = *self.logical_lens.get(row)?;
        if col > line_len {
            return None;
        }

        let mut found = None;
        for &(visual_row, start) in chunks {
            let len = self.visual_line_len(visual_row);
            if col >= start && col < start + len {
                found = Some((visual_row, col - start));
            } else if col == start + len && len > 0 {
                found = Some((visual_row, len));
            }
        }

        if col == line_len {
            let &(last_row, _) = chunks.last()?;
            found = Some((last_row, self.visual_line_len(last_row)));
        }

        found
    }

    /// Map a visual position back to a logical one.
    ///
    /// The column is clamped to the logical line length.
    #[must_use]
    pub fn to_logical(&self, visual_row: usize, visual_col: usize) -> Option<Position> {
        let &(row, start) = self.visual_to_logical.get(visual_row)?;
        let line_len = self.logical_lens.get(row).copied().unwrap_or(0);
        Some((row, (start + visual_col).min(line_len)))
    }
}

/// Lay out `lines` at `width` columns using the default width method.
#[must_use]
pub fn compute_layout(lines: &[String], cursor: Position, width: usize) -> VisualLayout {
    compute_layout_with_method(lines, cursor, width, WidthMethod::default())
}

/// Lay out `lines` at `width` columns.
///
/// An empty slice is treated as a single empty line.
#[must_use]
pub fn compute_layout_with_method(
    lines: &[String],
    cursor: Position,
    width: usize,
    method: WidthMethod,
) -> VisualLayout {
    let empty = [String::new()];
    let lines = if lines.is_empty() { &empty[..] } else { lines };

    let mut layout = VisualLayout {
        logical_to_visual: Vec::with_capacity(lines.len()),
        logical_lens: Vec::with_capacity(lines.len()),
        ..VisualLayout::default()
    };

    for (row, line) in lines.iter().enumerate() {
        let mut chunks = Vec::new();
        for (start, len) in wrap_line(line, width, method) {
            chunks.push((layout.visual_lines.len(), start));
            layout.visual_to_logical.push((row, start));
            layout
                .visual_lines
                .push(cp_slice(line, start, start + len).to_string());
        }
        layout.logical_to_visual.push(chunks);
        layout.logical_lens.push(cp_len(line));
    }

    layout.visual_cursor = layout.to_visual(cursor.0, cursor.1).unwrap_or((0, 0));
    layout
}

/// Split one logical line into `(start, len)` chunks in code points.
///
/// Always returns at least one chunk; an empty line yields `(0, 0)`.
fn wrap_line(line: &str, width: usize, method: WidthMethod) -> Vec<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![(0, 0)];
    }

    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let mut chunk_width = 0;
        let mut chunk_len = 0;
        // Code points in the chunk before its most recent space.
        let mut break_len: Option<usize> = None;

        for (i, &c) in chars.iter().enumerate().skip(pos) {
            let char_width = display_width_char_with_method(c, method);
            if chunk_width + char_width > width {
                if let Some(n) = break_len {
                    if n > 0 && pos + n < i {
                        chunk_len = n;
                    }
                }
                break;
            }
            chunk_width += char_width;
            chunk_len += 1;
            if c == ' ' {
                break_len = Some(chunk_len - 1);
            }
        }

        // Never stall: a code point wider than the viewport stands alone.
        if chunk_len == 0 {
            chunk_len = 1;
        }

        chunks.push((pos, chunk_len));
        pos += chunk_len;

        if pos < chars.len() && chars[pos] == ' ' {
            pos += 1;
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_short_line_single_chunk() {
        let layout = compute_layout(&lines("hello"), (0, 2), 80);
        assert_eq!(layout.visual_lines, vec!["hello"]);
        assert_eq!(layout.logical_to_visual, vec![vec![(0, 0)]]);
        assert_eq!(layout.visual_to_logical, vec![(0, 0)]);
        assert_eq!(layout.visual_cursor, (0, 2));
    }

    #[test]
    fn test_word_break_consumes_space() {
        let layout = compute_layout(&lines("The quick brown fox"), (0, 0), 10);
        assert_eq!(layout.visual_lines, vec!["The quick", "brown fox"]);
        assert_eq!(layout.logical_to_visual[0], vec![(0, 0), (1, 10)]);
        assert_eq!(layout.visual_to_logical, vec![(0, 0), (0, 10)]);
    }

    #[test]
    fn test_hard_break_without_spaces() {
        let layout = compute_layout(&lines("abcdefghij"), (0, 0), 4);
        assert_eq!(layout.visual_lines, vec!["abcd", "efgh", "ij"]);
        assert_eq!(layout.visual_to_logical, vec![(0, 0), (0, 4), (0, 8)]);
    }

    #[test]
    fn test_long_word_after_short_word() {
        let layout = compute_layout(&lines("a supercalifragilistic"), (0, 0), 8);
        assert_eq!(
            layout.visual_lines,
            vec!["a", "supercal", "ifragili", "stic"]
        );
    }

    #[test]
    fn test_empty_lines() {
        let layout = compute_layout(&lines("a\n\nb"), (1, 0), 10);
        assert_eq!(layout.visual_lines, vec!["a", "", "b"]);
        assert_eq!(layout.logical_to_visual, vec![vec![(0, 0)], vec![(1, 0)], vec![(2, 0)]]);
        assert_eq!(layout.visual_cursor, (1, 0));
    }

    #[test]
    fn test_empty_document() {
        let layout = compute_layout(&[String::new()], (0, 0), 10);
        assert_eq!(layout.visual_lines, vec![""]);
        assert_eq!(layout.visual_cursor, (0, 0));

        let layout = compute_layout(&[], (0, 0), 10);
        assert_eq!(layout.visual_lines, vec![""]);
        assert_eq!(layout.logical_to_visual, vec![vec![(0, 0)]]);
    }

    #[test]
    fn test_zero_width_makes_progress() {
        let layout = compute_layout(&lines("abc"), (0, 3), 0);
        assert_eq!(layout.visual_lines, vec!["a", "b", "c"]);
        assert_eq!(layout.visual_cursor, (2, 1));
    }

    #[test]
    fn test_wide_char_wider_than_viewport() {
        let layout = compute_layout(&lines("漢字"), (0, 0), 1);
        assert_eq!(layout.visual_lines, vec!["漢", "字"]);
    }

    #[test]
    fn test_wide_chars_wrap_by_display_width() {
        let layout = compute_layout(&lines("漢字漢字"), (0, 0), 5);
        assert_eq!(layout.visual_lines, vec!["漢字", "漢字"]);
    }

    #[test]
    fn test_emoji_is_one_column_position() {
        let layout = compute_layout(&lines("😀😀😀"), (0, 3), 4);
        assert_eq!(layout.visual_lines, vec!["😀😀", "😀"]);
        assert_eq!(layout.visual_cursor, (1, 1));
    }

    #[test]
    fn test_cursor_at_chunk_boundary_prefers_next_chunk() {
        // Hard break: position 4 is both the end of "abcd" and the start of "efgh".
        let layout = compute_layout(&lines("abcdefgh"), (0, 4), 4);
        assert_eq!(layout.visual_cursor, (1, 0));
    }

    #[test]
    fn test_cursor_on_consumed_space() {
        let layout = compute_layout(&lines("The quick brown fox"), (0, 9), 10);
        assert_eq!(layout.visual_cursor, (0, 9));
        let layout = compute_layout(&lines("The quick brown fox"), (0, 10), 10);
        assert_eq!(layout.visual_cursor, (1, 0));
    }

    #[test]
    fn test_cursor_at_end_of_line() {
        let layout = compute_layout(&lines("The quick brown fox\nx"), (0, 19), 10);
        assert_eq!(layout.visual_cursor, (1, 9));
    }

    #[test]
    fn test_trailing_space_at_break() {
        let layout = compute_layout(&lines("abc "), (0, 4), 3);
        assert_eq!(layout.visual_lines, vec!["abc"]);
        assert_eq!(layout.visual_cursor, (0, 3));
    }

    #[test]
    fn test_to_logical_clamps() {
        let layout = compute_layout(&lines("The quick brown fox"), (0, 0), 10);
        assert_eq!(layout.to_logical(1, 2), Some((0, 12)));
        assert_eq!(layout.to_logical(1, 99), Some((0, 19)));
        assert_eq!(layout.to_logical(5, 0), None);
    }

    #[test]
    fn test_to_visual_out_of_range() {
        let layout = compute_layout(&lines("abc"), (0, 0), 10);
        assert_eq!(layout.to_visual(0, 4), None);
        assert_eq!(layout.to_visual(1, 0), None);
    }

    #[test]
    fn test_every_position_round_trips() {
        let doc = lines("The quick brown fox jumps\n\nover the lazy dog");
        let layout = compute_layout(&doc, (0, 0), 7);
        for (row, line) in doc.iter().enumerate() {
            for col in 0..=cp_len(line) {
                let (vrow, vcol) = layout.to_visual(row, col).expect("position maps");
                let (lrow, lcol) = layout.to_logical(vrow, vcol).expect("maps back");
                assert_eq!(lrow, row);
                // Same chunk: the recovered column lies within the chunk span.
                let start = layout.visual_to_logical[vrow].1;
                assert!(lcol >= start && lcol <= start + layout.visual_line_len(vrow) + 1);
            }
        }
    }

    #[test]
    fn test_chunk_counts_sum_to_visual_lines() {
        let doc = lines("one two three four five six\nseven\n\neight nine ten");
        let layout = compute_layout(&doc, (0, 0), 6);
        let total: usize = layout.logical_to_visual.iter().map(Vec::len).sum();
        assert_eq!(total, layout.visual_line_count());
    }

    #[test]
    fn test_width_method_changes_wrapping() {
        let doc = lines("①①①①");
        let narrow = compute_layout_with_method(&doc, (0, 0), 4, WidthMethod::WcWidth);
        let wide = compute_layout_with_method(&doc, (0, 0), 4, WidthMethod::Unicode);
        assert_eq!(narrow.visual_line_count(), 1);
        assert_eq!(wide.visual_line_count(), 2);
    }
}
