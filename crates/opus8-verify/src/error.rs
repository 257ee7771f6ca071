use thiserror::Error;

use opus8_core::FormatError;
use opus8_fingerprint::FingerprintError;
use opus8_store::StoreError;

/// Infrastructure failures during verification.
///
/// A failed *check* is report data, not an error; these variants cover
/// the cases where no report could be produced at all.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The reference could not be normalized to a content address.
    #[error("invalid reference: {0}")]
    InvalidReference(#[from] FormatError),

    /// The record bytes could not be fetched.
    #[error("content store: {0}")]
    Store(#[from] StoreError),

    /// The local audio file could not be fingerprinted.
    #[error("fingerprint: {0}")]
    Fingerprint(#[from] FingerprintError),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
