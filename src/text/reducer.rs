//! The buffer state machine.
//!
//! [`reduce`] is a pure function from a state and an [`Action`] to the next
//! state. It never panics on a consistent state, and actions that cannot
//! apply (backspace at the origin, an invalid range) return an unchanged
//! copy without touching history.

use crate::ansi::strip_unsafe_characters;
use crate::text::action::{Action, Direction};
use crate::text::layout::{Position, VisualLayout, compute_layout_with_method};
use crate::text::state::{BufferState, normalize_line_endings, offset_to_logical_pos, split_lines};
use crate::unicode::{cp_len, cp_slice, cp_slice_from, is_word_char, to_code_points};

/// Apply `action` to `state`, returning the next state.
#[must_use]
pub fn reduce(state: &BufferState, action: &Action) -> BufferState {
    match action {
        Action::SetText { text, push_undo } => set_text(state, text, *push_undo),
        Action::Insert(text) => insert(state, text),
        Action::Backspace => backspace(state),
        Action::Delete => delete(state),
        Action::Move(direction) => move_cursor(state, *direction),
        Action::DeleteWordLeft => delete_word_left(state),
        Action::DeleteWordRight => delete_word_right(state),
        Action::KillLineRight => kill_line_right(state),
        Action::KillLineLeft => kill_line_left(state),
        Action::ReplaceRange {
            start_row,
            start_col,
            end_row,
            end_col,
            text,
        } => replace_range(state, (*start_row, *start_col), (*end_row, *end_col), text),
        Action::Undo => undo(state),
        Action::Redo => redo(state),
        Action::MoveToOffset(offset) => {
            let (row, col) = offset_to_logical_pos(&state.lines, *offset);
            BufferState {
                cursor_row: row,
                cursor_col: col,
                preferred_col: None,
                ..state.clone()
            }
        }
        Action::SetViewportWidth(width) => BufferState {
            viewport_width: *width,
            ..state.clone()
        },
        Action::CreateUndoSnapshot => state.with_undo_pushed(),
    }
}

/// Whether `start..end` is a span [`Action::ReplaceRange`] would accept.
///
/// The span must be ordered, end on an existing row, and end within that
/// row. A start column past its line's end is clamped rather than rejected.
#[must_use]
pub fn is_valid_range(state: &BufferState, start: Position, end: Position) -> bool {
    let (start_row, start_col) = start;
    let (end_row, end_col) = end;
    if start_row > end_row || (start_row == end_row && start_col > end_col) {
        return false;
    }
    end_row < state.lines.len() && end_col <= state.line_len(end_row)
}

fn set_text(state: &BufferState, text: &str, push_undo: bool) -> BufferState {
    let mut next = if push_undo {
        state.with_undo_pushed()
    } else {
        state.clone()
    };
    next.lines = split_lines(text);
    next.cursor_row = next.lines.len() - 1;
    next.cursor_col = next.line_len(next.cursor_row);
    next.preferred_col = None;
    next
}

fn insert(state: &BufferState, text: &str) -> BufferState {
    let text = strip_unsafe_characters(&normalize_line_endings(text));
    let cursor = state.cursor();
    edit(state, cursor, cursor, &text)
}

fn backspace(state: &BufferState) -> BufferState {
    match state.cursor() {
        (0, 0) => state.clone(),
        (row, 0) => edit(state, (row - 1, state.line_len(row - 1)), (row, 0), ""),
        (row, col) => edit(state, (row, col - 1), (row, col), ""),
    }
}

fn delete(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    if col < state.line_len(row) {
        edit(state, (row, col), (row, col + 1), "")
    } else if row + 1 < state.lines.len() {
        edit(state, (row, col), (row + 1, 0), "")
    } else {
        state.clone()
    }
}

fn delete_word_left(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    if col == 0 {
        return backspace(state);
    }
    let start = word_start_before(&to_code_points(state.line(row)), col);
    edit(state, (row, start), (row, col), "")
}

fn delete_word_right(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    let chars = to_code_points(state.line(row));
    if col >= chars.len() {
        return delete(state);
    }
    let end = word_end_after(&chars, col);
    edit(state, (row, col), (row, end), "")
}

fn kill_line_right(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    let len = state.line_len(row);
    if col < len {
        edit(state, (row, col), (row, len), "")
    } else {
        delete(state)
    }
}

fn kill_line_left(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    if col == 0 {
        return state.clone();
    }
    edit(state, (row, 0), (row, col), "")
}

fn replace_range(state: &BufferState, start: Position, end: Position, text: &str) -> BufferState {
    if !is_valid_range(state, start, end) {
        return state.clone();
    }
    let start = (start.0, start.1.min(state.line_len(start.0)));
    edit(state, start, end, &normalize_line_endings(text))
}

fn undo(state: &BufferState) -> BufferState {
    let mut next = state.clone();
    let Some(snapshot) = next.undo_stack.pop() else {
        return next;
    };
    next.redo_stack.push(state.snapshot());
    next.restore(snapshot);
    next.preferred_col = None;
    next
}

fn redo(state: &BufferState) -> BufferState {
    let mut next = state.clone();
    let Some(snapshot) = next.redo_stack.pop() else {
        return next;
    };
    next.undo_stack.push(state.snapshot());
    next.restore(snapshot);
    next.preferred_col = None;
    next
}

fn move_cursor(state: &BufferState, direction: Direction) -> BufferState {
    match direction {
        Direction::WordLeft => return word_left(state),
        Direction::WordRight => return word_right(state),
        _ => {}
    }

    let layout = compute_layout_with_method(
        &state.lines,
        state.cursor(),
        state.viewport_width,
        state.width_method,
    );
    let (mut visual_row, mut visual_col) = layout.visual_cursor;
    let mut preferred = state.preferred_col;
    let row_end = last_col(&layout, visual_row);
    let last_row = layout.visual_line_count().saturating_sub(1);

    match direction {
        Direction::Left => {
            preferred = None;
            if visual_col > 0 {
                visual_col -= 1;
            } else if visual_row > 0 {
                visual_row -= 1;
                visual_col = last_col(&layout, visual_row);
            }
        }
        Direction::Right => {
            preferred = None;
            if visual_col < row_end {
                visual_col += 1;
            } else if visual_row < last_row {
                visual_row += 1;
                visual_col = 0;
            }
        }
        Direction::Up => {
            if visual_row > 0 {
                let target = *preferred.get_or_insert(visual_col);
                visual_row -= 1;
                visual_col = target.min(last_col(&layout, visual_row));
            }
        }
        Direction::Down => {
            if visual_row < last_row {
                let target = *preferred.get_or_insert(visual_col);
                visual_row += 1;
                visual_col = target.min(last_col(&layout, visual_row));
            }
        }
        Direction::Home => {
            preferred = None;
            visual_col = 0;
        }
        Direction::End => {
            preferred = None;
            visual_col = row_end;
        }
        Direction::WordLeft | Direction::WordRight => {}
    }

    let Some(&(row, start)) = layout.visual_to_logical.get(visual_row) else {
        return state.clone();
    };
    let ends_line = layout
        .visual_to_logical
        .get(visual_row + 1)
        .is_none_or(|&(next_row, _)| next_row != row);
    // The end of a line's last row is the line end, even when a trailing
    // space was consumed by the wrap.
    let cursor_col = if ends_line && visual_col >= layout.visual_line_len(visual_row) {
        state.line_len(row)
    } else {
        (start + visual_col).min(state.line_len(row))
    };
    BufferState {
        cursor_row: row,
        cursor_col,
        preferred_col: preferred,
        ..state.clone()
    }
}

/// Rightmost column the cursor can occupy on `visual_row`.
///
/// On a row hard-broken mid-word its end offset is also the start of the
/// next row and resolves there, so the last reachable column is one less.
fn last_col(layout: &VisualLayout, visual_row: usize) -> usize {
    let len = layout.visual_line_len(visual_row);
    let here = layout.visual_to_logical.get(visual_row);
    let next = layout.visual_to_logical.get(visual_row + 1);
    match (here, next) {
        (Some(&(row, start)), Some(&next)) if len > 0 && next == (row, start + len) => len - 1,
        _ => len,
    }
}

fn word_left(state: &BufferState) -> BufferState {
    let (row, col) = match state.cursor() {
        (0, 0) => return state.clone(),
        (row, 0) => (row - 1, state.line_len(row - 1)),
        (row, col) => (row, word_start_before(&to_code_points(state.line(row)), col)),
    };
    BufferState {
        cursor_row: row,
        cursor_col: col,
        preferred_col: None,
        ..state.clone()
    }
}

fn word_right(state: &BufferState) -> BufferState {
    let (row, col) = state.cursor();
    let chars = to_code_points(state.line(row));
    let target = if col < chars.len() {
        (row, word_end_after(&chars, col))
    } else if row + 1 < state.lines.len() {
        (row + 1, 0)
    } else {
        return state.clone();
    };
    BufferState {
        cursor_row: target.0,
        cursor_col: target.1,
        preferred_col: None,
        ..state.clone()
    }
}

/// Column reached by moving one word left from `col` within a line.
///
/// If nothing before `col` is a word character the move is a single code
/// point. Otherwise trailing separators are skipped, then the word itself.
fn word_start_before(chars: &[char], col: usize) -> usize {
    let prefix = &chars[..col.min(chars.len())];
    if !prefix.iter().any(|&c| is_word_char(c)) {
        return prefix.len().saturating_sub(1);
    }
    let mut start = prefix.len();
    while start > 0 && !is_word_char(prefix[start - 1]) {
        start -= 1;
    }
    while start > 0 && is_word_char(prefix[start - 1]) {
        start -= 1;
    }
    start
}

/// Column reached by moving one word right from `col` within a line.
fn word_end_after(chars: &[char], col: usize) -> usize {
    let mut end = col;
    while end < chars.len() && !is_word_char(chars[end]) {
        end += 1;
    }
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    end
}

/// Record undo, replace `start..end` with `text`, and move the cursor to the
/// end of the inserted text.
fn edit(state: &BufferState, start: Position, end: Position, text: &str) -> BufferState {
    let mut next = state.with_undo_pushed();
    let (row, col) = splice_lines(&mut next.lines, start, end, text);
    next.cursor_row = row;
    next.cursor_col = col;
    next.preferred_col = None;
    next
}

/// Replace a logical span with `\n`-separated text, returning the position
/// just after the inserted text.
fn splice_lines(lines: &mut Vec<String>, start: Position, end: Position, text: &str) -> Position {
    let (start_row, start_col) = start;
    let (end_row, end_col) = end;
    let line_at = |row: usize| lines.get(row).map_or("", String::as_str);
    let prefix = cp_slice(line_at(start_row), 0, start_col).to_string();
    let suffix = cp_slice_from(line_at(end_row), end_col).to_string();

    let parts: Vec<&str> = text.split('\n').collect();
    let last = parts.len() - 1;
    let replacement = parts.iter().enumerate().map(|(i, part)| {
        let mut line = String::new();
        if i == 0 {
            line.push_str(&prefix);
        }
        line.push_str(part);
        if i == last {
            line.push_str(&suffix);
        }
        line
    });
    let end_row = end_row.min(lines.len().saturating_sub(1));
    lines.splice(start_row..=end_row, replacement);

    let lead = if last == 0 { cp_len(&prefix) } else { 0 };
    (start_row + last, lead + cp_len(parts[last]))
}
