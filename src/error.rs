//! Scan error types shared by the prowl tools

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unrecoverable errors raised while scanning a log file.
///
/// Both variants abort the scan with no partial report; the display strings
/// are printed verbatim to stderr by the binaries.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Error: File not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("An error occurred during file processing (around line {line}): {source}")]
    Read { line: usize, source: io::Error },
}

impl ScanError {
    /// Classify a failure to open the log file. Line 0 marks errors raised
    /// before any line was read.
    pub fn from_open(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Read { line: 0, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ScanError::NotFound {
            path: PathBuf::from("/tmp/missing.log"),
        };
        assert_eq!(err.to_string(), "Error: File not found at /tmp/missing.log");
    }

    #[test]
    fn test_read_message_includes_line() {
        let err = ScanError::Read {
            line: 42,
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let msg = err.to_string();
        assert!(msg.contains("around line 42"));
        assert!(msg.starts_with("An error occurred during file processing"));
    }

    #[test]
    fn test_from_open_classifies_not_found() {
        let err = ScanError::from_open(
            Path::new("gone.log"),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_from_open_other_errors_report_line_zero() {
        let err = ScanError::from_open(
            Path::new("denied.log"),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(matches!(err, ScanError::Read { line: 0, .. }));
    }
}
