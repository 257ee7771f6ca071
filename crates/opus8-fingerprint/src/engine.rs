//! Fingerprinting and verification.
//!
//! Hashing and metadata extraction run concurrently; the input file is
//! read-only for the duration of the operation. Verification compares
//! field-by-field and reports exactly which fields diverged, so callers
//! can distinguish "wrong file" from "same file, re-encoded".

use std::path::Path;

use serde::{Deserialize, Serialize};

use opus8_core::AudioFingerprint;

use crate::error::{FingerprintError, Result};
use crate::hash::hash_file;
use crate::metadata::{extension_of, extract_metadata};

/// Audio container extensions the engine accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["wav", "mp3", "flac", "aiff", "aif", "ogg", "m4a", "aac"];

/// Fingerprint an audio file: content hash plus technical metadata.
///
/// Fails with [`FingerprintError::NotFound`] if the file is missing and
/// [`FingerprintError::UnsupportedFormat`] if the extension is not in
/// [`SUPPORTED_EXTENSIONS`].
pub async fn fingerprint_audio(path: &Path) -> Result<AudioFingerprint> {
    if !tokio::fs::try_exists(path).await? {
        return Err(FingerprintError::NotFound(path.to_path_buf()));
    }
    let ext = extension_of(path);
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(FingerprintError::UnsupportedFormat(ext));
    }

    let (hash, meta) = tokio::join!(hash_file(path), extract_metadata(path));
    let hash = hash?;
    let meta = meta?;

    Ok(AudioFingerprint {
        sha256: hash,
        duration_ms: meta.duration_ms,
        format: meta.format,
        sample_rate: meta.sample_rate,
        bit_depth: meta.bit_depth,
    })
}

/// Which fingerprint fields diverged during verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintMismatch {
    pub hash: bool,
    pub duration: bool,
    pub format: bool,
}

impl FingerprintMismatch {
    /// True if any field diverged.
    pub fn any(&self) -> bool {
        self.hash || self.duration || self.format
    }
}

/// Structured outcome of a fingerprint verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintReport {
    /// True iff hash, duration, and format all match.
    pub valid: bool,
    pub mismatch: FingerprintMismatch,
    pub declared: AudioFingerprint,
    pub actual: AudioFingerprint,
}

/// Recompute a fingerprint for `path` and diff it against `declared`.
///
/// Format comparison is case-insensitive. A mismatch is data, not an
/// error; only infrastructure failures (missing file, unsupported
/// extension) raise.
pub async fn verify_fingerprint(
    path: &Path,
    declared: &AudioFingerprint,
) -> Result<FingerprintReport> {
    let actual = fingerprint_audio(path).await?;

    let mismatch = FingerprintMismatch {
        hash: actual.sha256 != declared.sha256,
        duration: actual.duration_ms != declared.duration_ms,
        format: !actual.format.eq_ignore_ascii_case(&declared.format),
    };

    Ok(FingerprintReport {
        valid: !mismatch.any(),
        mismatch,
        declared: declared.clone(),
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opus8_core::FingerprintHash;

    fn write_wav(path: &Path, seconds: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..(44_100 * seconds) {
            writer.write_sample(((i % 100) as i16) * 50).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[tokio::test]
    async fn test_fingerprint_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 1);

        let a = fingerprint_audio(&path).await.unwrap();
        let b = fingerprint_audio(&path).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.duration_ms, 1000);
        assert_eq!(a.format, "wav");
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not audio").unwrap();

        let result = fingerprint_audio(&path).await;
        assert!(matches!(
            result,
            Err(FingerprintError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }

    #[tokio::test]
    async fn test_missing_file_reports_not_found_before_extension() {
        let result = fingerprint_audio(Path::new("/nonexistent/file.xyz")).await;
        assert!(matches!(result, Err(FingerprintError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_verify_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 1);

        let declared = fingerprint_audio(&path).await.unwrap();
        let report = verify_fingerprint(&path, &declared).await.unwrap();
        assert!(report.valid);
        assert!(!report.mismatch.any());
    }

    #[tokio::test]
    async fn test_verify_names_only_the_diverging_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 1);

        let mut declared = fingerprint_audio(&path).await.unwrap();
        declared.sha256 = FingerprintHash::parse(&"aa".repeat(32)).unwrap();

        let report = verify_fingerprint(&path, &declared).await.unwrap();
        assert!(!report.valid);
        assert!(report.mismatch.hash);
        assert!(!report.mismatch.duration);
        assert!(!report.mismatch.format);
    }

    #[tokio::test]
    async fn test_verify_format_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 1);

        let mut declared = fingerprint_audio(&path).await.unwrap();
        declared.format = "WAV".into();

        let report = verify_fingerprint(&path, &declared).await.unwrap();
        assert!(report.valid);
    }

    #[tokio::test]
    async fn test_verify_duration_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 2);

        let mut declared = fingerprint_audio(&path).await.unwrap();
        declared.duration_ms = 1000;

        let report = verify_fingerprint(&path, &declared).await.unwrap();
        assert!(!report.valid);
        assert!(report.mismatch.duration);
        assert!(!report.mismatch.hash);
    }
}
