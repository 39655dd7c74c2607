//! The buffer controller.
//!
//! [`TextBuffer`] owns the current [`BufferState`], routes every edit
//! through [`reduce`], and keeps the derived pieces a host needs between
//! edits: the vertical scroll offset and the change notification.

use std::fmt;

use crate::config::{BufferOptions, DRAG_DROP_MIN_LEN, EditorEnv, Viewport};
use crate::editor::{RawModeControl, edit_in_external_editor, resolve_editor_command};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::input::{Event, KeyCommand, KeyEvent, action_for_key};
use crate::text::action::{Action, Direction};
use crate::text::layout::{Position, VisualLayout, compute_layout_with_method};
use crate::text::reducer::{is_valid_range, reduce};
use crate::text::state::{BufferState, offset_to_logical_pos};
use crate::unicode::cp_len;

type PathValidator = Box<dyn Fn(&str) -> bool>;
type ChangeListener = Box<dyn FnMut(&str)>;

/// Multi-line, word-wrapping text buffer for a terminal input field.
///
/// All editing goes through [`dispatch`](Self::dispatch), directly or via
/// the convenience methods. Layout is recomputed from the current state on
/// request.
///
/// ```
/// use promptbuf::{BufferOptions, Direction, TextBuffer};
///
/// let mut buffer = TextBuffer::new(BufferOptions::new().with_viewport(10, 5));
/// buffer.insert("The quick brown fox");
/// assert_eq!(buffer.all_visual_lines(), vec!["The quick", "brown fox"]);
/// assert_eq!(buffer.visual_cursor(), (1, 9));
///
/// buffer.move_cursor(Direction::Up);
/// assert_eq!(buffer.cursor(), (0, 9));
///
/// buffer.undo();
/// assert_eq!(buffer.text(), "");
/// ```
pub struct TextBuffer {
    state: BufferState,
    viewport: Viewport,
    visual_scroll_row: usize,
    shell_mode: bool,
    editor: Option<String>,
    editor_env: EditorEnv,
    path_validator: Option<PathValidator>,
    change_listener: Option<ChangeListener>,
    raw_mode: Option<Box<dyn RawModeControl>>,
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("visual_scroll_row", &self.visual_scroll_row)
            .field("shell_mode", &self.shell_mode)
            .field("editor", &self.editor)
            .field("editor_env", &self.editor_env)
            .finish_non_exhaustive()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(BufferOptions::default())
    }
}

impl TextBuffer {
    /// Create a buffer from options.
    #[must_use]
    pub fn new(options: BufferOptions) -> Self {
        let state = BufferState::new(
            &options.initial_text,
            options.initial_cursor_offset,
            options.viewport.width,
        )
        .with_history_limit(options.history_limit)
        .with_width_method(options.width_method);

        let mut buffer = Self {
            state,
            viewport: options.viewport,
            visual_scroll_row: 0,
            shell_mode: options.shell_mode,
            editor: options.editor,
            editor_env: EditorEnv::default(),
            path_validator: None,
            change_listener: None,
            raw_mode: None,
        };
        buffer.update_scroll();
        buffer
    }

    /// Check inserted text against this predicate to detect dropped files.
    #[must_use]
    pub fn with_path_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.path_validator = Some(Box::new(validator));
        self
    }

    /// Call `listener` with the full text after every change to it.
    #[must_use]
    pub fn with_change_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.change_listener = Some(Box::new(listener));
        self
    }

    /// Raw-mode hook used around external editor sessions.
    #[must_use]
    pub fn with_raw_mode(mut self, control: Box<dyn RawModeControl>) -> Self {
        self.raw_mode = Some(control);
        self
    }

    /// Editor preferences consulted by
    /// [`open_in_external_editor`](Self::open_in_external_editor).
    #[must_use]
    pub fn with_editor_env(mut self, env: EditorEnv) -> Self {
        self.editor_env = env;
        self
    }

    // ----- Readers -----

    /// The document joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.text()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.state.lines
    }

    /// Logical cursor `(row, col)`.
    #[must_use]
    pub fn cursor(&self) -> Position {
        self.state.cursor()
    }

    #[must_use]
    pub fn preferred_col(&self) -> Option<usize> {
        self.state.preferred_col
    }

    #[must_use]
    pub fn selection_anchor(&self) -> Option<Position> {
        self.state.selection_anchor
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The complete current state.
    #[must_use]
    pub fn state(&self) -> &BufferState {
        &self.state
    }

    /// Lay out the current document at the viewport width.
    #[must_use]
    pub fn layout(&self) -> VisualLayout {
        compute_layout_with_method(
            &self.state.lines,
            self.state.cursor(),
            self.state.viewport_width,
            self.state.width_method,
        )
    }

    /// Every visual line of the document.
    #[must_use]
    pub fn all_visual_lines(&self) -> Vec<String> {
        self.layout().visual_lines
    }

    /// The visual lines currently scrolled into the viewport.
    #[must_use]
    pub fn viewport_visual_lines(&self) -> Vec<String> {
        self.layout()
            .visual_lines
            .into_iter()
            .skip(self.visual_scroll_row)
            .take(self.viewport.height)
            .collect()
    }

    /// Cursor position among [`all_visual_lines`](Self::all_visual_lines).
    #[must_use]
    pub fn visual_cursor(&self) -> Position {
        self.layout().visual_cursor
    }

    /// Index of the first visual line shown in the viewport.
    #[must_use]
    pub fn visual_scroll_row(&self) -> usize {
        self.visual_scroll_row
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.state.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.state.redo_stack.is_empty()
    }

    // ----- Editing -----

    /// Apply an action and notify the change listener if the text changed.
    pub fn dispatch(&mut self, action: Action) {
        let next = reduce(&self.state, &action);
        let changed = action.edits_text() && next.lines != self.state.lines;
        self.state = next;
        self.update_scroll();

        if changed {
            if let Some(listener) = self.change_listener.as_mut() {
                listener(&self.state.text());
            }
        }
    }

    /// Replace the whole document; undoable.
    pub fn set_text(&mut self, text: &str) {
        self.dispatch(Action::set_text(text));
    }

    /// Insert typed or pasted text at the cursor.
    ///
    /// Text with line breaks is inserted as is. Otherwise, outside shell
    /// mode, text the path validator accepts as a file path (optionally
    /// single-quoted and backslash-escaped) is inserted as `@path`. A DEL
    /// character in the text deletes the code point before it.
    pub fn insert(&mut self, text: &str) {
        if text.contains(['\n', '\r']) {
            self.dispatch(Action::insert(text));
            return;
        }

        let text = self.as_dropped_path(text).unwrap_or_else(|| text.to_string());

        let mut pending = String::new();
        for c in text.chars() {
            if c == '\u{7f}' {
                if !pending.is_empty() {
                    self.dispatch(Action::Insert(std::mem::take(&mut pending)));
                }
                self.dispatch(Action::Backspace);
            } else {
                pending.push(c);
            }
        }
        if !pending.is_empty() {
            self.dispatch(Action::Insert(pending));
        }
    }

    pub fn newline(&mut self) {
        self.dispatch(Action::insert("\n"));
    }

    pub fn backspace(&mut self) {
        self.dispatch(Action::Backspace);
    }

    pub fn delete(&mut self) {
        self.dispatch(Action::Delete);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.dispatch(Action::Move(direction));
    }

    pub fn undo(&mut self) {
        self.dispatch(Action::Undo);
    }

    pub fn redo(&mut self) {
        self.dispatch(Action::Redo);
    }

    pub fn delete_word_left(&mut self) {
        self.dispatch(Action::DeleteWordLeft);
    }

    pub fn delete_word_right(&mut self) {
        self.dispatch(Action::DeleteWordRight);
    }

    pub fn kill_line_right(&mut self) {
        self.dispatch(Action::KillLineRight);
    }

    pub fn kill_line_left(&mut self) {
        self.dispatch(Action::KillLineLeft);
    }

    /// Move the cursor to a flat code-point offset.
    pub fn move_to_offset(&mut self, offset: usize) {
        self.dispatch(Action::MoveToOffset(offset));
    }

    /// Replace the logical span `start..end` with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] and leaves the buffer unchanged if the
    /// span is inverted or ends outside the document.
    pub fn replace_range(&mut self, start: Position, end: Position, text: &str) -> Result<()> {
        if !is_valid_range(&self.state, start, end) {
            emit_log(
                LogLevel::Debug,
                &format!("rejected replace range {start:?}..{end:?}"),
            );
            return Err(Error::InvalidRange {
                start_row: start.0,
                start_col: start.1,
                end_row: end.0,
                end_col: end.1,
            });
        }
        self.dispatch(Action::ReplaceRange {
            start_row: start.0,
            start_col: start.1,
            end_row: end.0,
            end_col: end.1,
            text: text.to_string(),
        });
        Ok(())
    }

    /// Replace the span between two flat code-point offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start` resolves after `end`.
    pub fn replace_range_by_offset(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        let start = offset_to_logical_pos(&self.state.lines, start);
        let end = offset_to_logical_pos(&self.state.lines, end);
        self.replace_range(start, end, text)
    }

    /// Resize the viewport. Only the width affects layout.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.viewport = Viewport::new(width, height);
        self.dispatch(Action::SetViewportWidth(width));
    }

    // ----- Input -----

    /// Apply the editing command bound to `key`.
    ///
    /// Returns `false` if the key has no binding.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(command) = action_for_key(key) else {
            return false;
        };
        match command {
            KeyCommand::Newline => self.newline(),
            KeyCommand::Move(direction) => self.move_cursor(direction),
            KeyCommand::DeleteWordLeft => self.delete_word_left(),
            KeyCommand::DeleteWordRight => self.delete_word_right(),
            KeyCommand::KillLineRight => self.kill_line_right(),
            KeyCommand::KillLineLeft => self.kill_line_left(),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
            KeyCommand::Backspace => self.backspace(),
            KeyCommand::Delete => self.delete(),
            KeyCommand::Insert(c) => self.insert(c.encode_utf8(&mut [0; 4])),
        }
        true
    }

    /// Route a terminal event: keys through the key bindings, pastes to
    /// [`insert`](Self::insert), resizes to [`set_viewport`](Self::set_viewport).
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(paste) => {
                self.insert(paste.text());
                true
            }
            Event::Resize(resize) => {
                let viewport = resize.viewport();
                self.set_viewport(viewport.width, viewport.height);
                true
            }
        }
    }

    // ----- External editor -----

    /// Edit the document in an external editor.
    ///
    /// `editor` overrides the configured command. On success the edited
    /// text replaces the document as a single undoable step. On failure the
    /// buffer and its history are left untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from
    /// [`edit_in_external_editor`](crate::editor::edit_in_external_editor).
    pub fn open_in_external_editor(&mut self, editor: Option<&str>) -> Result<()> {
        let command = resolve_editor_command(editor, self.editor.as_deref(), &self.editor_env);
        let text = self.text();

        match edit_in_external_editor(&command, &text, self.raw_mode.as_deref_mut()) {
            Ok(edited) => {
                emit_log(LogLevel::Info, "external editor closed, reloading buffer");
                self.dispatch(Action::CreateUndoSnapshot);
                self.dispatch(Action::SetText {
                    text: edited,
                    push_undo: false,
                });
                Ok(())
            }
            Err(err) => {
                emit_log(LogLevel::Error, &format!("external editor error: {err}"));
                Err(err)
            }
        }
    }

    // ----- Internals -----

    /// Keep the visual cursor inside the viewport rows.
    fn update_scroll(&mut self) {
        let (cursor_row, _) = self.visual_cursor();
        let height = self.viewport.height.max(1);
        if cursor_row < self.visual_scroll_row {
            self.visual_scroll_row = cursor_row;
        } else if cursor_row >= self.visual_scroll_row + height {
            self.visual_scroll_row = cursor_row + 1 - height;
        }
    }

    /// `@path` if `text` looks like a dropped file path.
    fn as_dropped_path(&self, text: &str) -> Option<String> {
        if self.shell_mode || cp_len(text) < DRAG_DROP_MIN_LEN {
            return None;
        }
        let validator = self.path_validator.as_ref()?;

        let unquoted = text
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(text);
        let candidate = unquoted.trim();
        validator(&unescape_path(candidate)).then(|| format!("@{candidate}"))
    }
}

/// Drop the backslash from every `\x` escape.
fn unescape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(escaped)) => {
                out.push(escaped);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::new(BufferOptions::new().with_text(text).with_cursor_offset(cp_len(text)))
    }

    #[test]
    fn test_new_places_cursor_from_offset() {
        let b = TextBuffer::new(BufferOptions::new().with_text("ab\ncd").with_cursor_offset(4));
        assert_eq!(b.cursor(), (1, 1));
        assert!(!b.can_undo());
        assert!(!b.can_redo());
    }

    #[test]
    fn test_unescape_path() {
        assert_eq!(unescape_path(r"/tmp/my\ file.txt"), "/tmp/my file.txt");
        assert_eq!(unescape_path(r"a\\b"), r"a\b");
        assert_eq!(unescape_path(r"trailing\"), r"trailing\");
    }

    #[test]
    fn test_insert_dropped_path() {
        let mut b = TextBuffer::default().with_path_validator(|p| p == "/tmp/a b.png");
        b.insert(r"'/tmp/a\ b.png'");
        assert_eq!(b.text(), r"@/tmp/a\ b.png");
    }

    #[test]
    fn test_insert_path_rejected_by_validator() {
        let mut b = TextBuffer::default().with_path_validator(|_| false);
        b.insert("/tmp/x.png");
        assert_eq!(b.text(), "/tmp/x.png");
    }

    #[test]
    fn test_insert_path_ignored_in_shell_mode() {
        let mut b = TextBuffer::new(BufferOptions::new().with_shell_mode(true))
            .with_path_validator(|_| true);
        b.insert("/tmp/x.png");
        assert_eq!(b.text(), "/tmp/x.png");
    }

    #[test]
    fn test_insert_short_text_is_not_a_path() {
        let mut b = TextBuffer::default().with_path_validator(|_| true);
        b.insert("ab");
        assert_eq!(b.text(), "ab");
    }

    #[test]
    fn test_insert_with_newline_skips_path_check() {
        let mut b = TextBuffer::default().with_path_validator(|_| true);
        b.insert("a\nb");
        assert_eq!(b.lines(), ["a", "b"]);
    }

    #[test]
    fn test_insert_del_acts_as_backspace() {
        let mut b = buffer("x");
        b.insert("ab\u{7f}c");
        assert_eq!(b.text(), "xac");
        b.insert("\u{7f}\u{7f}");
        assert_eq!(b.text(), "x");
    }

    #[test]
    fn test_change_listener_fires_on_text_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut b = buffer("ab").with_change_listener(move |t| sink.borrow_mut().push(t.to_string()));

        b.insert("c");
        b.move_cursor(Direction::Left);
        b.backspace();
        b.set_viewport(20, 5);
        b.undo();

        assert_eq!(*seen.borrow(), vec!["abc", "ac", "abc"]);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut b = TextBuffer::new(BufferOptions::new().with_viewport(80, 2));
        b.insert("1\n2\n3\n4");
        assert_eq!(b.visual_scroll_row(), 2);
        assert_eq!(b.viewport_visual_lines(), vec!["3", "4"]);

        b.move_cursor(Direction::Up);
        b.move_cursor(Direction::Up);
        assert_eq!(b.visual_scroll_row(), 1);
        assert_eq!(b.viewport_visual_lines(), vec!["2", "3"]);
    }

    #[test]
    fn test_replace_range_errors_on_invalid() {
        let mut b = buffer("hello");
        let err = b.replace_range((0, 3), (0, 1), "x").unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start_col: 3, .. }));
        assert_eq!(b.text(), "hello");
        assert!(!b.can_undo());

        assert!(b.replace_range((0, 0), (1, 0), "x").is_err());
    }

    #[test]
    fn test_replace_range_by_offset() {
        let mut b = buffer("hello\nworld");
        b.replace_range_by_offset(3, 8, "P").unwrap();
        assert_eq!(b.text(), "helPrld");
        assert_eq!(b.cursor(), (0, 4));
    }

    #[test]
    fn test_set_viewport_rewraps() {
        let mut b = buffer("The quick brown fox");
        assert_eq!(b.all_visual_lines().len(), 1);
        b.set_viewport(10, 3);
        assert_eq!(b.all_visual_lines(), vec!["The quick", "brown fox"]);
        assert_eq!(b.viewport(), Viewport::new(10, 3));
        assert!(!b.can_undo());
    }
}
