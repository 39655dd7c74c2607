//! Editing actions understood by the reducer.

/// Cursor movement directions.
///
/// `Left`, `Right`, `Up`, `Down`, `Home` and `End` operate on the wrapped
/// visual lines. The word moves operate on logical lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    WordLeft,
    WordRight,
}

/// A single state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Replace the whole document; the cursor goes to the end.
    SetText { text: String, push_undo: bool },
    /// Insert text at the cursor after sanitizing it.
    Insert(String),
    Backspace,
    Delete,
    Move(Direction),
    DeleteWordLeft,
    DeleteWordRight,
    /// Delete from the cursor to the end of the line.
    KillLineRight,
    /// Delete from the start of the line to the cursor.
    KillLineLeft,
    /// Replace a logical span. Invalid spans leave the state unchanged.
    ReplaceRange {
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
        text: String,
    },
    Undo,
    Redo,
    /// Move to a flat code-point offset into the `\n`-joined document.
    MoveToOffset(usize),
    SetViewportWidth(usize),
    /// Push the current state onto the undo stack without changing it.
    CreateUndoSnapshot,
}

impl Action {
    /// Shorthand for [`Action::SetText`] with undo tracking.
    #[must_use]
    pub fn set_text(text: impl Into<String>) -> Self {
        Self::SetText {
            text: text.into(),
            push_undo: true,
        }
    }

    /// Shorthand for [`Action::Insert`].
    #[must_use]
    pub fn insert(text: impl Into<String>) -> Self {
        Self::Insert(text.into())
    }

    /// Whether the action can change the document text.
    #[must_use]
    pub const fn edits_text(&self) -> bool {
        !matches!(
            self,
            Self::Move(_)
                | Self::MoveToOffset(_)
                | Self::SetViewportWidth(_)
                | Self::CreateUndoSnapshot
        )
    }
}
