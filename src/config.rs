//! Buffer configuration.
//!
//! Everything the buffer would otherwise pick up from the environment
//! (viewport size, preferred editor, width rules) is passed in explicitly so
//! the buffer can be driven without a terminal.

use crate::unicode::WidthMethod;

/// Default number of undo snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Minimum code-point length before inserted text is checked as a dropped
/// file path.
pub const DRAG_DROP_MIN_LEN: usize = 3;

/// Visible area the buffer lays out into, in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Editor preferences captured from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorEnv {
    /// Preferred full-screen editor (`$VISUAL`).
    pub visual: Option<String>,
    /// Preferred line editor (`$EDITOR`).
    pub editor: Option<String>,
}

impl EditorEnv {
    /// Read `$VISUAL` and `$EDITOR` from the current process.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_process_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            visual: read("VISUAL"),
            editor: read("EDITOR"),
        }
    }
}

/// Options for constructing a [`TextBuffer`](crate::TextBuffer).
#[derive(Clone, Debug)]
pub struct BufferOptions {
    /// Initial document text.
    pub initial_text: String,
    /// Initial cursor position as a flat code-point offset.
    pub initial_cursor_offset: usize,
    /// Visible area used for wrapping and vertical scrolling.
    pub viewport: Viewport,
    /// Maximum number of undo snapshots.
    pub history_limit: usize,
    /// Width rule for ambiguous-width characters.
    pub width_method: WidthMethod,
    /// Explicit editor command; takes precedence over [`EditorEnv`].
    pub editor: Option<String>,
    /// When set, inserted text is never rewritten as an `@path` reference.
    pub shell_mode: bool,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            initial_cursor_offset: 0,
            viewport: Viewport::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            width_method: WidthMethod::default(),
            editor: None,
            shell_mode: false,
        }
    }
}

impl BufferOptions {
    /// Options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    /// Set the initial cursor offset.
    #[must_use]
    pub fn with_cursor_offset(mut self, offset: usize) -> Self {
        self.initial_cursor_offset = offset;
        self
    }

    /// Set the viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: usize, height: usize) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    /// Set the undo history limit.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the width method.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Set an explicit editor command.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// Enable or disable shell mode.
    #[must_use]
    pub fn with_shell_mode(mut self, enabled: bool) -> Self {
        self.shell_mode = enabled;
        self
    }
}
