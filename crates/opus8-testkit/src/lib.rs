//! # opus8 Testkit
//!
//! Testing utilities for opus8.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A memory-store-backed harness with pre-filled
//!   builders and real WAV file helpers
//! - **Generators**: Proptest strategies for addresses, wallets,
//!   fingerprints, and whole declarations
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust,ignore
//! use opus8_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let receipt = fixture.publish(fixture.minimal_declaration()).await;
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use opus8_testkit::generators::{declaration_from_params, DeclarationParams};
//!
//! proptest! {
//!     #[test]
//!     fn declarations_serialize(params: DeclarationParams) {
//!         let decl = declaration_from_params(&params);
//!         prop_assert!(decl.to_json_bytes().is_ok());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_fingerprint, write_wav, TestFixture};
pub use generators::{declaration_from_params, DeclarationParams};
