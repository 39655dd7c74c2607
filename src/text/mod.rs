//! Text storage, editing and wrapping.
//!
//! The document is a list of logical lines addressed by code point. Edits
//! are [`Action`]s applied by the pure [`reduce`] function; [`TextBuffer`]
//! owns the current state and is what hosts normally use.
//!
//! Key types:
//!
//! - [`BufferState`]: lines, cursor and bounded undo/redo history
//! - [`Action`]: one editing step
//! - [`VisualLayout`]: the document wrapped to a viewport width
//! - [`TextBuffer`]: the owning controller
//!
//! # Examples
//!
//! ## Driving the reducer directly
//!
//! ```
//! use promptbuf::text::{Action, BufferState, reduce};
//!
//! let state = BufferState::new("Hello", 5, 80);
//! let state = reduce(&state, &Action::insert(" World"));
//! assert_eq!(state.text(), "Hello World");
//!
//! let state = reduce(&state, &Action::Undo);
//! assert_eq!(state.text(), "Hello");
//! ```
//!
//! ## Multi-line paste
//!
//! ```
//! use promptbuf::TextBuffer;
//!
//! let mut buffer = TextBuffer::default();
//! buffer.insert("first\r\nsecond");
//! assert_eq!(buffer.lines(), ["first", "second"]);
//! assert_eq!(buffer.cursor(), (1, 6));
//! ```

mod action;
mod buffer;
mod layout;
mod reducer;
mod state;

pub use action::{Action, Direction};
pub use buffer::TextBuffer;
pub use layout::{Position, VisualLayout, compute_layout, compute_layout_with_method};
pub use reducer::{is_valid_range, reduce};
pub use state::{
    BufferState, Snapshot, initial_cursor_position, normalize_line_endings, offset_to_logical_pos,
    split_lines,
};
