//! Error types for promptbuf.

use std::fmt;
use std::io;

/// Result type alias for promptbuf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for promptbuf operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the temporary file or the raw-mode toggle.
    Io(io::Error),
    /// The external editor process could not be started.
    EditorLaunch { command: String, source: io::Error },
    /// The external editor exited unsuccessfully.
    ///
    /// `status` is `None` when the process was terminated by a signal.
    EditorExited { command: String, status: Option<i32> },
    /// The resolved editor command contained no program name.
    EmptyEditorCommand,
    /// A replacement range was inverted or outside the document.
    InvalidRange {
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::EditorLaunch { command, source } => {
                write!(f, "failed to launch external editor `{command}`: {source}")
            }
            Self::EditorExited {
                command,
                status: Some(code),
            } => write!(f, "external editor `{command}` exited with status {code}"),
            Self::EditorExited {
                command,
                status: None,
            } => write!(f, "external editor `{command}` was terminated by a signal"),
            Self::EmptyEditorCommand => write!(f, "external editor command is empty"),
            Self::InvalidRange {
                start_row,
                start_col,
                end_row,
                end_col,
            } => write!(
                f,
                "invalid range ({start_row}, {start_col})..({end_row}, {end_col})"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::EditorLaunch { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::EditorExited {
            command: "vi".to_string(),
            status: Some(2),
        };
        assert!(err.to_string().contains("exited with status 2"));

        let err = Error::EditorExited {
            command: "vi".to_string(),
            status: None,
        };
        assert!(err.to_string().contains("signal"));

        let err = Error::InvalidRange {
            start_row: 2,
            start_col: 0,
            end_row: 1,
            end_col: 4,
        };
        assert!(err.to_string().contains("(2, 0)..(1, 4)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_launch_error_source() {
        let err = Error::EditorLaunch {
            command: "nope".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(Error::EmptyEditorCommand.source().is_none());
    }
}
