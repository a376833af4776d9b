use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Message surfaced to the analyst whenever a file could not be decoded.
pub const MISFORMATTED_MESSAGE: &str = "file was of the wrong type or misformatted";

/// A line that failed numeric, date or event-type decoding.
///
/// `line` is the 1-based physical line number in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct FormatError {
    pub line: usize,
    pub message: String,
}

impl FormatError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlmError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("misformatted input: {0}")]
    Format(#[from] FormatError),

    #[error("no usable data rows in {}", path.display())]
    EmptyInput { path: PathBuf },

    #[error("config error: {0}")]
    Config(String),
}

impl PlmError {
    /// Maps an I/O failure on `path` onto the error taxonomy.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            PlmError::FileNotFound { path }
        } else {
            PlmError::Read { path, source }
        }
    }

    /// Human-readable text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            PlmError::FileNotFound { path } => format!("Could not find {}", path.display()),
            PlmError::Read { path, .. } => format!("Could not read {}", path.display()),
            PlmError::Format(_) => MISFORMATTED_MESSAGE.to_string(),
            PlmError::EmptyInput { path } => {
                format!("{} contained no data rows", path.display())
            }
            PlmError::Config(message) => message.clone(),
        }
    }

    /// Warnings leave the caller with usable (possibly empty) results.
    pub fn is_warning(&self) -> bool {
        matches!(self, PlmError::EmptyInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_io_errors_become_file_not_found() {
        let err = PlmError::from_io(
            "night.csv",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, PlmError::FileNotFound { .. }));

        let err = PlmError::from_io(
            "night.csv",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, PlmError::Read { .. }));
    }

    #[test]
    fn format_errors_show_the_misformatted_message() {
        let err = PlmError::from(FormatError::new(3, "bad digit"));
        assert_eq!(err.user_message(), MISFORMATTED_MESSAGE);
        assert_eq!(err.to_string(), "misformatted input: line 3: bad digit");
        assert!(!err.is_warning());
    }
}
