//! Error types for the fingerprint engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fingerprinting audio.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The file extension is not in the supported set.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// I/O failure while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fingerprint operations.
pub type Result<T> = std::result::Result<T, FingerprintError>;
