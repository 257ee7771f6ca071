//! ContentStore trait: the abstract interface to an immutable blob store.
//!
//! The core treats the store as an opaque content-addressed blob service.
//! Implementations include an HTTP gateway client (production) and an
//! in-memory store (for tests).

use async_trait::async_trait;
use bytes::Bytes;

use opus8_core::{ContentAddress, Declaration};

use crate::error::{Result, StoreError};

/// Async interface to an immutable, content-addressed blob store.
///
/// # Design Notes
///
/// - **Publish is idempotent**: the address is a function of the bytes, so
///   publishing the same bytes twice yields the same address.
/// - **Existence probing never raises**: `exists` collapses network and
///   protocol errors to `false`, because probes feed into aggregate
///   scoring where non-fatal degradation is required.
/// - **Pinning is best-effort**: a pin failure is reported but never
///   retried, and never invalidates a prior successful publish.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes durably and return their content address.
    async fn publish(&self, bytes: Bytes) -> Result<ContentAddress>;

    /// Retrieve the raw bytes at an address.
    ///
    /// Use [`ContentStoreExt::fetch_declaration`] when the payload is
    /// expected to be a declaration; it re-validates schema on every fetch.
    async fn fetch(&self, address: &ContentAddress) -> Result<Bytes>;

    /// Best-effort existence probe. Errors collapse to `false`.
    async fn exists(&self, address: &ContentAddress) -> Result<bool>;

    /// Request durability for an address. Best-effort, never retried.
    async fn pin(&self, address: &ContentAddress) -> Result<()>;
}

/// Extension methods shared by every store implementation.
pub trait ContentStoreExt: ContentStore {
    /// Fetch and schema-validate a declaration.
    ///
    /// An unparseable or schema-invalid payload is a store-level failure
    /// ([`StoreError::InvalidPayload`]), never silently handed back.
    fn fetch_declaration(
        &self,
        address: &ContentAddress,
    ) -> impl std::future::Future<Output = Result<Declaration>> + Send;
}

impl<S: ContentStore + ?Sized> ContentStoreExt for S {
    async fn fetch_declaration(&self, address: &ContentAddress) -> Result<Declaration> {
        let bytes = self.fetch(address).await?;
        let decl = opus8_core::from_json_bytes(&bytes).map_err(StoreError::InvalidPayload)?;
        Ok(decl)
    }
}
