//! Error taxonomy for conversion operations.
//!
//! Only fatal conditions are errors. Degraded detection (encoding or
//! delimiter guesses falling back to defaults) and per-sheet skips are
//! modeled as log events and explicit result entries instead, because
//! processing continues through them.

use thiserror::Error;

/// Fatal conversion errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input could not be parsed at all.
    #[error("failed to parse {filename}: {message}")]
    MalformedInput { filename: String, message: String },

    /// Input parsed but yielded no records anywhere.
    #[error("no valid data found in {filename}: {message}")]
    EmptySource { filename: String, message: String },

    /// Unknown output format, or an output format the input cannot
    /// represent. Raised before any output is produced.
    #[error("unsupported output format: {message}")]
    UnsupportedFormat { message: String },
}

/// Machine-checkable error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    EmptySource,
    UnsupportedFormat,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ConvertError::EmptySource { .. } => ErrorKind::EmptySource,
            ConvertError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
