//! Error types for the unified API.

use thiserror::Error;

use opus8_core::{FormatError, ValidationError};
use opus8_fingerprint::FingerprintError;
use opus8_store::StoreError;
use opus8_verify::VerifyError;

/// Errors that can occur through the unified opus8 API.
#[derive(Debug, Error)]
pub enum Opus8Error {
    /// Schema validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Identifier or address format error.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Content store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Fingerprinting error.
    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Verification error.
    #[error("verify error: {0}")]
    Verify(#[from] VerifyError),

    /// Declaration could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for unified API operations.
pub type Result<T> = std::result::Result<T, Opus8Error>;
