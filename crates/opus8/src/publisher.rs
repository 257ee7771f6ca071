//! The publish workflow: durable storage plus identifier upgrade.
//!
//! Publication is two steps with distinct failure modes. Storing the
//! bytes is the one that matters: once the store returns an address the
//! declaration exists durably and the published identifier is a pure
//! function of that address. Pinning afterwards is best-effort; a pin
//! failure is logged and never invalidates the publish.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use opus8_core::{published_id, ContentAddress, Declaration};
use opus8_store::ContentStore;

use crate::error::Result;

/// Outcome of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    /// The declaration with its identifier upgraded to published form.
    pub declaration: Declaration,
    /// Content address of the stored bytes.
    pub address: ContentAddress,
    /// The published-form identifier (`o8-<address>`).
    pub declaration_id: String,
    /// Whether the pin request succeeded.
    pub pinned: bool,
}

/// Publishes declarations to a content store.
pub struct Publisher<S> {
    store: Arc<S>,
}

impl<S: ContentStore> Publisher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Publish a built declaration.
    ///
    /// Serializes the record (still carrying its pending identifier),
    /// stores the bytes, then upgrades the in-memory identifier to the
    /// published form derived from the returned address. The stored
    /// bytes keep the pending identifier; the published identifier
    /// always refers to exactly those bytes.
    pub async fn publish(&self, declaration: Declaration) -> Result<PublishReceipt> {
        let bytes = declaration.to_json_bytes()?;
        let address = self.store.publish(Bytes::from(bytes)).await?;

        let declaration_id = published_id(&address);
        info!(%address, id = %declaration_id, "declaration published");

        let pinned = match self.store.pin(&address).await {
            Ok(()) => true,
            Err(e) => {
                warn!(%address, error = %e, "pin failed; declaration remains published");
                false
            }
        };

        let mut declaration = declaration;
        declaration.declaration_id = declaration_id.clone();

        Ok(PublishReceipt {
            declaration,
            address,
            declaration_id,
            pinned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use opus8_core::{ident, AudioFingerprint, DeclarationBuilder, FingerprintHash};
    use opus8_store::{ContentStoreExt, MemoryStore};

    fn built_declaration() -> Declaration {
        let mut b = DeclarationBuilder::new();
        b.artist("Mira Vale").unwrap();
        b.methodology("Hand-played, AI-mixed.").unwrap();
        b.fingerprint(AudioFingerprint {
            sha256: FingerprintHash::parse(&"ab".repeat(32)).unwrap(),
            duration_ms: 215_000,
            format: "wav".into(),
            sample_rate: Some(48_000),
            bit_depth: Some(24),
        })
        .unwrap();
        b.build().unwrap()
    }

    #[tokio::test]
    async fn test_publish_upgrades_identifier() {
        let store = Arc::new(MemoryStore::new());
        let decl = built_declaration();
        assert!(ident::is_pending(&decl.declaration_id));

        let receipt = Publisher::new(store.clone()).publish(decl).await.unwrap();
        assert!(ident::is_published(&receipt.declaration_id));
        assert_eq!(
            receipt.declaration_id,
            format!("o8-{}", receipt.address)
        );
        assert_eq!(receipt.declaration.declaration_id, receipt.declaration_id);
        assert!(receipt.pinned);
        assert!(store.is_pinned(&receipt.address));
    }

    #[tokio::test]
    async fn test_stored_bytes_keep_the_pending_identifier() {
        let store = Arc::new(MemoryStore::new());
        let decl = built_declaration();
        let pending_id = decl.declaration_id.clone();

        let receipt = Publisher::new(store.clone()).publish(decl).await.unwrap();
        let stored = store.fetch_declaration(&receipt.address).await.unwrap();
        assert_eq!(stored.declaration_id, pending_id);
    }

    #[tokio::test]
    async fn test_store_failure_aborts_publish() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next(1);
        let result = Publisher::new(store.clone())
            .publish(built_declaration())
            .await;
        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
