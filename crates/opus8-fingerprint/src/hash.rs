//! Streaming SHA-256 over raw file bytes.
//!
//! The digest is computed strictly over the bytes on disk, so any
//! tampering changes it. Hashing never degrades: a read failure is an
//! error, not a fallback.

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use opus8_core::FingerprintHash;

use crate::error::{FingerprintError, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 digest of a file's raw bytes.
///
/// Fails with [`FingerprintError::NotFound`] if the path does not exist.
pub async fn hash_file(path: &Path) -> Result<FingerprintHash> {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FingerprintError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let digest: [u8; 32] = hasher.finalize().into();
    Ok(FingerprintHash::from_digest(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_hash_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"some audio bytes")
            .unwrap();

        let h1 = hash_file(&path).await.unwrap();
        let h2 = hash_file(&path).await.unwrap();
        assert_eq!(h1, h2);
    }

    #[tokio::test]
    async fn test_hash_matches_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.bin");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello world")
            .unwrap();

        let h = hash_file(&path).await.unwrap();
        // sha256("hello world")
        assert_eq!(
            h.as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[tokio::test]
    async fn test_tampering_changes_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, b"original").unwrap();
        let before = hash_file(&path).await.unwrap();

        std::fs::write(&path, b"originaL").unwrap();
        let after = hash_file(&path).await.unwrap();
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let result = hash_file(Path::new("/nonexistent/audio.wav")).await;
        assert!(matches!(result, Err(FingerprintError::NotFound(_))));
    }
}
