//! External editor round trip.
//!
//! The buffer text is written to a file in a fresh temporary directory, the
//! user's editor runs on it as a blocking child process that inherits the
//! terminal, and the saved file is read back. The terminal is taken out of
//! raw mode for the duration so the editor sees a normal tty.

use std::fs;
use std::io;
use std::process::Command;

use crate::config::EditorEnv;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::text::normalize_line_endings;

/// Prefix of the temporary directory holding the edited file.
pub const TEMP_DIR_PREFIX: &str = "promptbuf-edit-";

/// Name of the edited file inside the temporary directory.
pub const TEMP_FILE_NAME: &str = "buffer.txt";

/// Editor used when nothing else is configured.
#[cfg(windows)]
pub const DEFAULT_EDITOR: &str = "notepad";
/// Editor used when nothing else is configured.
#[cfg(not(windows))]
pub const DEFAULT_EDITOR: &str = "vi";

/// Host hook for toggling the terminal's raw mode.
pub trait RawModeControl {
    /// Whether the terminal is currently in raw mode.
    fn is_raw(&self) -> bool;

    /// Enter or leave raw mode.
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;
}

/// Pick the editor command.
///
/// Precedence: `explicit`, then `configured`, then `$VISUAL`, then
/// `$EDITOR`, then [`DEFAULT_EDITOR`]. Blank values are skipped.
#[must_use]
pub fn resolve_editor_command(
    explicit: Option<&str>,
    configured: Option<&str>,
    env: &EditorEnv,
) -> String {
    [
        explicit,
        configured,
        env.visual.as_deref(),
        env.editor.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|cmd| !cmd.trim().is_empty())
    .unwrap_or(DEFAULT_EDITOR)
    .to_string()
}

/// Split a command line on whitespace into program and leading arguments.
///
/// # Errors
///
/// Returns [`Error::EmptyEditorCommand`] if `command` has no words.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut words = command.split_whitespace().map(str::to_string);
    let program = words.next().ok_or(Error::EmptyEditorCommand)?;
    Ok((program, words.collect()))
}

/// Leaves raw mode on creation and re-enters it on drop.
struct RawModeSuspension<'a, R: RawModeControl + ?Sized> {
    control: Option<&'a mut R>,
}

impl<'a, R: RawModeControl + ?Sized> RawModeSuspension<'a, R> {
    fn new(control: Option<&'a mut R>) -> io::Result<Self> {
        match control {
            Some(control) if control.is_raw() => {
                control.set_raw_mode(false)?;
                Ok(Self {
                    control: Some(control),
                })
            }
            _ => Ok(Self { control: None }),
        }
    }
}

impl<R: RawModeControl + ?Sized> Drop for RawModeSuspension<'_, R> {
    fn drop(&mut self) {
        if let Some(control) = self.control.take() {
            if let Err(err) = control.set_raw_mode(true) {
                emit_log(
                    LogLevel::Warn,
                    &format!("failed to restore raw mode after external editor: {err}"),
                );
            }
        }
    }
}

/// Edit `text` in an external editor and return the saved contents.
///
/// Line endings of the result are normalized to `\n`. The temporary
/// directory is removed on every path, and raw mode is restored if it was
/// suspended.
///
/// # Errors
///
/// Returns [`Error::EmptyEditorCommand`] for a blank command,
/// [`Error::EditorLaunch`] if the process cannot be spawned,
/// [`Error::EditorExited`] on a non-zero exit or signal, and [`Error::Io`]
/// for temporary file failures.
pub fn edit_in_external_editor<R: RawModeControl + ?Sized>(
    command: &str,
    text: &str,
    raw_mode: Option<&mut R>,
) -> Result<String> {
    let (program, args) = split_command(command)?;

    let dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()?;
    let path = dir.path().join(TEMP_FILE_NAME);
    fs::write(&path, text)?;

    emit_log(
        LogLevel::Info,
        &format!("launching external editor `{command}` on {}", path.display()),
    );

    let status = {
        let _suspension = RawModeSuspension::new(raw_mode)?;
        Command::new(&program).args(&args).arg(&path).status()
    };

    let status = status.map_err(|source| Error::EditorLaunch {
        command: command.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(Error::EditorExited {
            command: command.to_string(),
            status: status.code(),
        });
    }

    let edited = fs::read_to_string(&path)?;
    Ok(normalize_line_endings(&edited))
}
