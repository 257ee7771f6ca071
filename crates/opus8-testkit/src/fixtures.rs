//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use opus8::{PublishReceipt, Publisher};
use opus8_core::{AudioFingerprint, Declaration, DeclarationBuilder, FingerprintHash};
use opus8_store::{ContentStore, MemoryStore};

/// A test fixture with a shared memory store and a publisher over it.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub publisher: Publisher<MemoryStore>,
    /// Owns any WAV files written by the fixture.
    tempdir: tempfile::TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            publisher: Publisher::new(store.clone()),
            store,
            tempdir: tempfile::tempdir().expect("create tempdir"),
        }
    }

    /// A builder pre-filled with the minimum required fields.
    pub fn minimal_builder(&self) -> DeclarationBuilder {
        let mut b = DeclarationBuilder::new();
        b.artist("Mira Vale").expect("artist");
        b.methodology("Hand-played, AI-mixed.").expect("methodology");
        b.fingerprint(sample_fingerprint()).expect("fingerprint");
        b
    }

    /// A minimal valid declaration, still carrying its pending identifier.
    pub fn minimal_declaration(&self) -> Declaration {
        self.minimal_builder().build().expect("build")
    }

    /// Publish a declaration through the fixture's publisher.
    pub async fn publish(&self, declaration: Declaration) -> PublishReceipt {
        self.publisher.publish(declaration).await.expect("publish")
    }

    /// Store arbitrary bytes directly, bypassing the declaration model.
    pub async fn publish_bytes(&self, bytes: &'static [u8]) -> opus8_core::ContentAddress {
        self.store
            .publish(Bytes::from_static(bytes))
            .await
            .expect("publish bytes")
    }

    /// Write a mono 16-bit 44.1 kHz WAV of the given length into the
    /// fixture's tempdir and return its path.
    pub fn write_wav(&self, name: &str, seconds: u32) -> PathBuf {
        let path = self.tempdir.path().join(name);
        write_wav(&path, seconds);
        path
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A plausible fixed fingerprint for tests that never touch real audio.
pub fn sample_fingerprint() -> AudioFingerprint {
    AudioFingerprint {
        sha256: FingerprintHash::parse(&"ab".repeat(32)).expect("hash"),
        duration_ms: 215_000,
        format: "wav".into(),
        sample_rate: Some(48_000),
        bit_depth: Some(24),
    }
}

/// Write a mono 16-bit 44.1 kHz WAV tone to `path`.
pub fn write_wav(path: &Path, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for i in 0..(44_100 * seconds) {
        writer
            .write_sample(((i % 441) as i16) * 20)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}
