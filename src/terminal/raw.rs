//! termios-backed [`RawModeControl`] for hosts on a Unix tty.
//!
//! The only unsafe code in the crate lives here: `tcgetattr`/`tcsetattr`
//! calls over a caller-supplied descriptor.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::editor::RawModeControl;

/// Raw mode toggle for one terminal file descriptor.
///
/// Raw mode is read from the terminal itself, so a tty the host already put
/// in raw mode is recognized and can be suspended. Attributes this value
/// replaces are kept and put back on the opposite switch. Dropping the value
/// restores the terminal only if it entered raw mode itself.
#[derive(Debug)]
pub struct TermiosRawMode {
    fd: RawFd,
    /// Attributes to restore when leaving raw mode this value entered.
    cooked: Option<libc::termios>,
    /// The host's raw attributes, set aside while suspended.
    suspended_raw: Option<libc::termios>,
}

impl TermiosRawMode {
    /// Control raw mode on the given file descriptor.
    ///
    /// The terminal is left untouched until raw mode is requested.
    #[must_use]
    pub fn new<F: AsRawFd>(fd: &F) -> Self {
        Self {
            fd: fd.as_raw_fd(),
            cooked: None,
            suspended_raw: None,
        }
    }

    /// Control raw mode on stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(&io::stdin())
    }

    /// Enter raw mode. Does nothing if the terminal is already raw.
    pub fn enable(&mut self) -> io::Result<()> {
        let current = get_termios(self.fd)?;
        if is_raw_termios(&current) {
            return Ok(());
        }
        if let Some(raw) = self.suspended_raw.take() {
            set_termios(self.fd, &raw)?;
        } else {
            set_termios(self.fd, &make_raw(current))?;
            self.cooked = Some(current);
        }
        Ok(())
    }

    /// Leave raw mode. Does nothing if the terminal is not raw.
    ///
    /// Raw mode entered by [`enable`](Self::enable) is undone exactly.
    /// Raw mode set up by someone else is cooked by flag and remembered for
    /// the next `enable`.
    pub fn disable(&mut self) -> io::Result<()> {
        let Ok(current) = get_termios(self.fd) else {
            return Ok(());
        };
        if !is_raw_termios(&current) {
            return Ok(());
        }
        if let Some(cooked) = self.cooked.take() {
            set_termios(self.fd, &cooked)?;
        } else {
            set_termios(self.fd, &make_cooked(current))?;
            self.suspended_raw = Some(current);
        }
        Ok(())
    }
}

impl RawModeControl for TermiosRawMode {
    fn is_raw(&self) -> bool {
        get_termios(self.fd).is_ok_and(|termios| is_raw_termios(&termios))
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            self.enable()
        } else {
            self.disable()
        }
    }
}

impl Drop for TermiosRawMode {
    fn drop(&mut self) {
        if self.cooked.is_some() {
            let _ = self.disable();
        }
    }
}

/// Line editing off means raw, whatever the other flags say.
fn is_raw_termios(termios: &libc::termios) -> bool {
    termios.c_lflag & libc::ICANON == 0
}

/// Undo the flags [`make_raw`] clears, for raw attributes with no saved
/// cooked counterpart.
fn make_cooked(mut cooked: libc::termios) -> libc::termios {
    cooked.c_iflag |= libc::BRKINT | libc::ICRNL | libc::IXON;
    cooked.c_oflag |= libc::OPOST;
    cooked.c_lflag |= libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG;
    cooked
}

/// `cfmakeraw` equivalent, except reads block for one byte.
fn make_raw(mut raw: libc::termios) -> libc::termios {
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    // Ctrl+C, Ctrl+Z and Ctrl+V arrive as keys instead of signals.
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 1;
    raw.c_cc[libc::VTIME] = 0;
    raw
}

fn cvt(result: libc::c_int) -> io::Result<()> {
    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    // SAFETY: termios is plain data; tcgetattr fills it or fails.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    cvt(unsafe { libc::tcgetattr(fd, &mut termios) })?;
    Ok(termios)
}

/// Pending input is discarded so keys typed during the switch are not
/// misread under the new mode.
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: termios points to a live, initialized struct.
    cvt(unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) })
}
