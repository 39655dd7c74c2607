//! Decoded input events fed to [`TextBuffer::handle_event`](crate::TextBuffer::handle_event).
//!
//! Byte-level decoding stays with the host; these are the three things a
//! prompt buffer reacts to once a terminal sequence has been understood.

use crate::config::Viewport;
use crate::input::keyboard::KeyEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// The area available to the buffer changed.
    Resize(ResizeEvent),
    /// A bracketed paste, delivered as one block instead of key by key.
    Paste(PasteEvent),
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

impl From<ResizeEvent> for Event {
    fn from(resize: ResizeEvent) -> Self {
        Self::Resize(resize)
    }
}

impl From<PasteEvent> for Event {
    fn from(paste: PasteEvent) -> Self {
        Self::Paste(paste)
    }
}

/// New size of the input area, in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u16,
    pub height: u16,
}

impl ResizeEvent {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The viewport this resize describes.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(usize::from(self.width), usize::from(self.height))
    }
}

/// Pasted text, still raw: escapes and control characters are removed on
/// insertion, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
