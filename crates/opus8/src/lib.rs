//! # opus8
//!
//! The unified API for opus8 - creative-provenance declarations for
//! audio works, addressed by content and verifiable by anyone.
//!
//! ## Overview
//!
//! opus8 provides a library for:
//!
//! - **Declarations**: Immutable records of who made a work, with what
//!   tools, and how much of it was machine-generated
//! - **Fingerprinting**: Content hash plus technical metadata binding a
//!   declaration to one audio file
//! - **Publishing**: Durable storage in a content-addressed store, with
//!   the identifier derived from the stored bytes
//! - **Verification**: Multi-check audits of any published declaration
//!
//! ## Key Concepts
//!
//! - **Declaration**: Immutable. Never edited. Changes are new
//!   declarations carrying a revision-history entry.
//! - **Pending identifier** (`o8-pending-<token>`): minted at build time,
//!   before the bytes exist anywhere durable.
//! - **Published identifier** (`o8-<address>`): a pure function of the
//!   content address of the stored bytes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use opus8::{DeclarationBuilder, Publisher};
//! use opus8::fingerprint::fingerprint_audio;
//! use opus8::store::{HttpStore, StoreConfig};
//!
//! async fn example() {
//!     let fp = fingerprint_audio("track.wav".as_ref()).await.unwrap();
//!
//!     let mut builder = DeclarationBuilder::new();
//!     builder.artist("Mira Vale").unwrap();
//!     builder.methodology("Hand-played, AI-mixed.").unwrap();
//!     builder.fingerprint(fp).unwrap();
//!     let declaration = builder.build().unwrap();
//!
//!     let store = HttpStore::new(StoreConfig::new("http://127.0.0.1:8090")).unwrap();
//!     let publisher = Publisher::new(Arc::new(store));
//!     let receipt = publisher.publish(declaration).await.unwrap();
//!     println!("published as {}", receipt.declaration_id);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `opus8::core` - Declaration model, identifiers, schema validation
//! - `opus8::fingerprint` - Audio hashing and metadata extraction
//! - `opus8::store` - Content store clients
//! - `opus8::verify` - The verification pipeline

pub mod error;
pub mod publisher;

// Re-export component crates
pub use opus8_core as core;
pub use opus8_fingerprint as fingerprint;
pub use opus8_store as store;
pub use opus8_verify as verify;

// Re-export main types for convenience
pub use error::{Opus8Error, Result};
pub use publisher::{PublishReceipt, Publisher};

// Re-export commonly used component types
pub use opus8_core::{
    AudioFingerprint, ContentAddress, Declaration, DeclarationBuilder, ValidationError,
    WalletAddress,
};
pub use opus8_store::{ContentStore, HttpStore, MemoryStore, StoreConfig};
pub use opus8_verify::{VerificationEngine, VerificationReport, VerifyOptions};
