//! Decoded input events and their editing bindings.
//!
//! Byte-level terminal decoding happens in the host; this module starts
//! from already decoded keys, pastes and resizes.

mod dispatch;
mod event;
mod keyboard;

pub use dispatch::{KeyCommand, action_for_key};
pub use event::{Event, PasteEvent, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
