//! Buffer state and undo history.
//!
//! [`BufferState`] is a plain value. The reducer never edits a state in
//! place; each transition clones what it needs and returns a new value, so
//! an old state stays valid for as long as the caller holds it.

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::text::layout::Position;
use crate::unicode::{WidthMethod, cp_len};

/// Copy of the document and cursor stored in the undo/redo stacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// Complete editing state of a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferState {
    /// Logical lines. Never empty and never containing `\n` or `\r`.
    pub lines: Vec<String>,
    pub cursor_row: usize,
    /// Code-point offset into `lines[cursor_row]`.
    pub cursor_col: usize,
    /// Visual column remembered across consecutive vertical moves.
    pub preferred_col: Option<usize>,
    pub undo_stack: Vec<Snapshot>,
    pub redo_stack: Vec<Snapshot>,
    /// Maximum length of `undo_stack`.
    pub history_limit: usize,
    pub selection_anchor: Option<Position>,
    pub viewport_width: usize,
    pub width_method: WidthMethod,
}

impl Default for BufferState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            preferred_col: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            selection_anchor: None,
            viewport_width: 80,
            width_method: WidthMethod::default(),
        }
    }
}

impl BufferState {
    /// Create a state from `text` with the cursor at a flat code-point offset.
    #[must_use]
    pub fn new(text: &str, cursor_offset: usize, viewport_width: usize) -> Self {
        let lines = split_lines(text);
        let (cursor_row, cursor_col) = initial_cursor_position(&lines, cursor_offset);
        Self {
            lines,
            cursor_row,
            cursor_col,
            viewport_width,
            ..Self::default()
        }
    }

    /// Set the undo history limit.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the width method used for layout.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// The document joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Logical cursor position.
    #[must_use]
    pub fn cursor(&self) -> Position {
        (self.cursor_row, self.cursor_col)
    }

    /// Line `row`, or `""` when out of range.
    #[must_use]
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    /// Code-point length of line `row`.
    #[must_use]
    pub fn line_len(&self, row: usize) -> usize {
        cp_len(self.line(row))
    }

    /// Capture the document and cursor.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.clone(),
            cursor_row: self.cursor_row,
            cursor_col: self.cursor_col,
        }
    }

    /// Return a copy with the current state pushed onto the undo stack.
    ///
    /// The oldest entry is evicted once the stack exceeds `history_limit`,
    /// and the redo stack is cleared.
    #[must_use]
    pub fn with_undo_pushed(&self) -> Self {
        let mut next = self.clone();
        next.undo_stack.push(self.snapshot());
        if next.undo_stack.len() > next.history_limit {
            let excess = next.undo_stack.len() - next.history_limit;
            next.undo_stack.drain(..excess);
        }
        next.redo_stack.clear();
        next
    }

    /// Replace document and cursor with a snapshot's contents.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.lines = snapshot.lines;
        self.cursor_row = snapshot.cursor_row;
        self.cursor_col = snapshot.cursor_col;
    }

    /// Check the structural invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.lines.is_empty()
            && self.cursor_row < self.lines.len()
            && self.cursor_col <= self.line_len(self.cursor_row)
            && self.lines.iter().all(|l| !l.contains(['\n', '\r']))
            && self.undo_stack.len() <= self.history_limit.max(1)
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

/// Normalize line endings and split into logical lines.
///
/// Always returns at least one line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    normalize_line_endings(text)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Resolve a flat offset into `(row, col)` when a buffer is created.
///
/// An offset equal to a line's length stays at the end of that line; offsets
/// past the document end clamp to its last position.
#[must_use]
pub fn initial_cursor_position(lines: &[String], offset: usize) -> Position {
    let mut remaining = offset;
    for (row, line) in lines.iter().enumerate() {
        let len = cp_len(line);
        if remaining <= len {
            return (row, remaining);
        }
        remaining -= len + usize::from(row + 1 < lines.len());
    }
    lines
        .last()
        .map_or((0, 0), |line| (lines.len() - 1, cp_len(line)))
}

/// Resolve a flat offset over the `\n`-joined document into `(row, col)`.
///
/// An offset that lands on a line's newline moves to the start of the next
/// line. Offsets past the document end clamp to its last position.
#[must_use]
pub fn offset_to_logical_pos(lines: &[String], offset: usize) -> Position {
    if offset == 0 {
        return (0, 0);
    }

    let mut current = 0;
    for (row, line) in lines.iter().enumerate() {
        let len = cp_len(line);
        let has_newline = row + 1 < lines.len();
        let len_with_newline = len + usize::from(has_newline);

        if offset <= current + len {
            return (row, offset - current);
        }
        if offset <= current + len_with_newline {
            if has_newline {
                return (row + 1, 0);
            }
            return (row, len);
        }
        current += len_with_newline;
    }

    lines
        .last()
        .map_or((0, 0), |line| (lines.len() - 1, cp_len(line)))
}
