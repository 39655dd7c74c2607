//! ANSI escape sequence handling.
//!
//! The buffer only ever consumes escape sequences, it never emits them:
//! everything here exists to keep externally supplied text from smuggling
//! terminal control into the document.

mod strip;

pub use strip::{strip_ansi, strip_unsafe_characters};
