//! `promptbuf` - word-wrapping text buffer for terminal input fields
//!
//! Owns a multi-line document, its cursor and undo/redo history, and wraps
//! it to a terminal width with a two-way mapping between logical and visual
//! positions. Hosts feed it decoded keys, pastes and resizes and render the
//! visual lines it exposes; painting and byte-level input decoding stay with
//! the host.
//!
//! ```
//! use promptbuf::{BufferOptions, KeyCode, KeyEvent, TextBuffer};
//!
//! let mut buffer = TextBuffer::new(BufferOptions::new().with_viewport(12, 3));
//! for c in "hello world again".chars() {
//!     buffer.handle_key(&KeyEvent::char(c));
//! }
//! assert_eq!(buffer.all_visual_lines(), vec!["hello world", "again"]);
//!
//! buffer.handle_key(&KeyEvent::with_ctrl(KeyCode::Char('w')));
//! assert_eq!(buffer.text(), "hello world ");
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod ansi;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod input;
pub mod terminal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use config::{BufferOptions, EditorEnv, Viewport};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};

// Re-export input types
pub use input::{Event, KeyCode, KeyCommand, KeyEvent, KeyModifiers, PasteEvent, ResizeEvent};

// Re-export commonly used types
pub use editor::RawModeControl;
#[cfg(unix)]
pub use terminal::TermiosRawMode;
pub use text::{Action, BufferState, Direction, TextBuffer, VisualLayout, compute_layout, reduce};
pub use unicode::WidthMethod;
