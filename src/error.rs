//! Error types for metadata extraction and scrubbing.
//!
//! All backends report failures through a single [`ScrubError`] enum so the
//! orchestration layer can decide per-file what is fatal and what is merely
//! reported.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scrubbing operations.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Error type for all metadata and scrubbing operations.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Error occurred while reading or writing files.
    #[error("IO error for path '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// An external tool could not be spawned or exited unsuccessfully.
    #[error("'{tool}' invocation failed: {message}")]
    ToolFailure {
        tool: String,
        message: String,
        source: Option<io::Error>,
    },

    /// Error occurred while parsing or rewriting a PDF document.
    #[error("PDF processing error for '{}': {message}", .path.display())]
    PdfProcessing {
        path: PathBuf,
        message: String,
        source: Option<lopdf::Error>,
    },

    /// An office package could not be opened or read.
    #[error("office package error for '{}': {message}", .path.display())]
    OfficePackage {
        path: PathBuf,
        message: String,
        source: Option<zip::result::ZipError>,
    },

    /// Scrubbing was requested on a backend that cannot rewrite its format.
    #[error("scrubbing is not supported for the {backend} backend")]
    ScrubUnsupported { backend: &'static str },
}

impl ScrubError {
    /// Returns true if this error means the operation is unsupported rather
    /// than failed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::ScrubUnsupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrubError::ScrubUnsupported {
            backend: "xml-property",
        };
        assert_eq!(
            err.to_string(),
            "scrubbing is not supported for the xml-property backend"
        );
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_tool_failure_display() {
        let err = ScrubError::ToolFailure {
            tool: "exiftool".to_string(),
            message: "exited with status 1".to_string(),
            source: None,
        };
        assert_eq!(
            err.to_string(),
            "'exiftool' invocation failed: exited with status 1"
        );
        assert!(!err.is_unsupported());
    }
}
