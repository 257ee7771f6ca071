//! # opus8 Fingerprint
//!
//! Audio fingerprinting for opus8: a streaming SHA-256 content hash plus
//! technical metadata (duration, container format, sample rate, bit
//! depth), and field-by-field verification against a declared fingerprint.
//!
//! Hashing is strict: any read failure is an error. Metadata extraction
//! degrades gracefully to a zero-duration record when the container
//! cannot be parsed.

pub mod engine;
pub mod error;
pub mod hash;
pub mod metadata;

pub use engine::{
    fingerprint_audio, verify_fingerprint, FingerprintMismatch, FingerprintReport,
    SUPPORTED_EXTENSIONS,
};
pub use error::{FingerprintError, Result};
pub use hash::hash_file;
pub use metadata::{extract_metadata, AudioMetadata};
