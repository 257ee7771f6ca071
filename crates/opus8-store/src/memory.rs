//! In-memory implementation of the ContentStore trait.
//!
//! Primarily for testing. Addresses are genuine CIDv0 strings computed
//! from the stored bytes, so identity checks downstream exercise the same
//! code paths as a production store. Transient failures can be injected
//! to exercise retry behavior.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};

use opus8_core::ContentAddress;

use crate::error::{Result, StoreError};
use crate::traits::ContentStore;

/// In-memory content store. Thread-safe via RwLock; all data is lost when
/// dropped.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    blobs: HashMap<ContentAddress, Bytes>,
    pinned: HashSet<ContentAddress>,
    /// Remaining injected transient failures.
    failures: u32,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                blobs: HashMap::new(),
                pinned: HashSet::new(),
                failures: 0,
            }),
        }
    }

    /// Make the next `n` publish/fetch/exists calls fail with a transport
    /// error.
    pub fn fail_next(&self, n: u32) {
        self.inner.write().unwrap().failures = n;
    }

    /// Whether an address has been pinned.
    pub fn is_pinned(&self, address: &ContentAddress) -> bool {
        self.inner.read().unwrap().pinned.contains(address)
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// CIDv0 of a byte string: base58btc(0x12 0x20 ‖ sha256(bytes)).
    pub fn address_of(bytes: &[u8]) -> ContentAddress {
        let digest = Sha256::digest(bytes);
        let mut multihash = Vec::with_capacity(34);
        multihash.push(0x12);
        multihash.push(0x20);
        multihash.extend_from_slice(&digest);
        let encoded = bs58::encode(multihash).into_string();
        // Always 46 chars starting "Qm"; parse cannot fail.
        ContentAddress::parse(&encoded).expect("sha2-256 multihash encodes to canonical CIDv0")
    }

    fn take_failure(&self) -> bool {
        let mut inner = self.inner.write().unwrap();
        if inner.failures > 0 {
            inner.failures -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn publish(&self, bytes: Bytes) -> Result<ContentAddress> {
        if self.take_failure() {
            return Err(StoreError::Transport("injected failure".into()));
        }
        let address = Self::address_of(&bytes);
        self.inner
            .write()
            .unwrap()
            .blobs
            .insert(address.clone(), bytes);
        Ok(address)
    }

    async fn fetch(&self, address: &ContentAddress) -> Result<Bytes> {
        if self.take_failure() {
            return Err(StoreError::Transport("injected failure".into()));
        }
        self.inner
            .read()
            .unwrap()
            .blobs
            .get(address)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    async fn exists(&self, address: &ContentAddress) -> Result<bool> {
        if self.take_failure() {
            return Err(StoreError::Transport("injected failure".into()));
        }
        Ok(self.inner.read().unwrap().blobs.contains_key(address))
    }

    async fn pin(&self, address: &ContentAddress) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.blobs.contains_key(address) {
            return Err(StoreError::NotFound(address.to_string()));
        }
        inner.pinned.insert(address.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ContentStoreExt;

    #[tokio::test]
    async fn test_publish_computes_real_cidv0() {
        let store = MemoryStore::new();
        let addr = store.publish(Bytes::from_static(b"opus8")).await.unwrap();
        // Known vector: sha256("opus8") as CIDv0
        assert_eq!(
            addr.as_str(),
            "QmeaiUHQuE6e2QJsCM4MTRQx5R2cCWXQkNLXKasP9fVGMJ"
        );
    }

    #[tokio::test]
    async fn test_publish_fetch_roundtrip() {
        let store = MemoryStore::new();
        let addr = store
            .publish(Bytes::from_static(b"hello world"))
            .await
            .unwrap();
        let bytes = store.fetch(&addr).await.unwrap();
        assert_eq!(&bytes[..], b"hello world");
        assert!(store.exists(&addr).await.unwrap());
    }

    #[tokio::test]
    async fn test_publish_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.publish(Bytes::from_static(b"same")).await.unwrap();
        let b = store.publish(Bytes::from_static(b"same")).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let store = MemoryStore::new();
        let addr = MemoryStore::address_of(b"never stored");
        let result = store.fetch(&addr).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(!store.exists(&addr).await.unwrap());
    }

    #[tokio::test]
    async fn test_pin_requires_existing_blob() {
        let store = MemoryStore::new();
        let missing = MemoryStore::address_of(b"missing");
        assert!(store.pin(&missing).await.is_err());

        let addr = store.publish(Bytes::from_static(b"keep me")).await.unwrap();
        store.pin(&addr).await.unwrap();
        assert!(store.is_pinned(&addr));
    }

    #[tokio::test]
    async fn test_injected_failures_are_transient() {
        let store = MemoryStore::new();
        store.fail_next(1);
        let err = store.publish(Bytes::from_static(b"x")).await.unwrap_err();
        assert!(err.is_retryable());
        // Budget consumed; next call succeeds
        assert!(store.publish(Bytes::from_static(b"x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_failures_reach_existence_checks() {
        let store = MemoryStore::new();
        let addr = store.publish(Bytes::from_static(b"here")).await.unwrap();

        store.fail_next(1);
        let err = store.exists(&addr).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(store.exists(&addr).await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_declaration_rejects_garbage_payload() {
        let store = MemoryStore::new();
        let addr = store
            .publish(Bytes::from_static(b"{\"not\": \"a declaration\"}"))
            .await
            .unwrap();
        let result = store.fetch_declaration(&addr).await;
        assert!(matches!(result, Err(StoreError::InvalidPayload(_))));
    }
}
