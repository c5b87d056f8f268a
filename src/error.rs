//! Unified error types for chatpairs.
//!
//! This module provides a single [`ChatpairsError`] enum covering every error
//! that can escape a conversion run.
//!
//! # What is *not* an error
//!
//! Per-line problems never surface here. A stray line before the first
//! WhatsApp header, a message whose date cannot be read, or a JSONL line that
//! fails to decode is skipped (and logged through `tracing`) by the converter
//! that saw it. Only file-level failures and truly unexpected conditions abort
//! a run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatpairs operations.
///
/// # Example
///
/// ```rust
/// use chatpairs::error::Result;
///
/// fn count_lines(content: &str) -> Result<usize> {
///     Ok(content.lines().count())
/// }
/// # assert_eq!(count_lines("a\nb").unwrap(), 2);
/// ```
pub type Result<T> = std::result::Result<T, ChatpairsError>;

/// The error type for all chatpairs operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpairsError {
    /// The input file does not exist or cannot be opened.
    ///
    /// This is the only fatal input condition: no output file is produced.
    #[error("Cannot read input file '{}': {source}", path.display())]
    MissingInput {
        /// Path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred (typically while writing output).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    ///
    /// Decoding errors on individual input lines are skipped, not raised; this
    /// variant only covers failures while producing output.
    #[cfg(any(feature = "utterances", feature = "nested-jsonl"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A built-in line pattern failed to compile.
    #[error("Invalid {format} pattern: {message}")]
    InvalidPattern {
        /// The input format the pattern belongs to
        format: &'static str,
        /// Description from the regex engine
        message: String,
    },

    /// The output buffer was not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatpairsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatpairsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpairsError {
    /// Creates a missing-input error for `path`.
    pub fn missing_input(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatpairsError::MissingInput {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(format: &'static str, message: impl Into<String>) -> Self {
        ChatpairsError::InvalidPattern {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if the input file could not be read.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ChatpairsError::MissingInput { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpairsError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_display() {
        let err = ChatpairsError::missing_input(
            "chat.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("chat.txt"));
        assert!(msg.contains("not found"));
        assert!(err.is_missing_input());
        assert!(!err.is_io());
    }

    #[test]
    fn test_io_from() {
        let err: ChatpairsError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = ChatpairsError::invalid_pattern("WhatsApp", "unclosed group");
        assert_eq!(err.to_string(), "Invalid WhatsApp pattern: unclosed group");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = ChatpairsError::missing_input(
            "x",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.source().is_some());
    }
}
