//! Terminal integration for hosts running on a real tty.

#[cfg(unix)]
mod raw;

#[cfg(unix)]
pub use raw::TermiosRawMode;
