//! # opus8 Core
//!
//! Pure primitives for opus8: the declaration record model, validated
//! identifier lifecycle, schema validation, and the declaration builder.
//!
//! This crate contains no I/O. It is pure computation over
//! content-addressed provenance records.
//!
//! ## Key Types
//!
//! - [`Declaration`] - The complete creative-provenance record
//! - [`ContentAddress`] - Validated content-hash identifier (two canonical forms)
//! - [`DeclarationBuilder`] - Validating accumulator, finalized by `build()`
//! - [`ValidationError`] - Every schema violation, field-qualified
//!
//! ## Identifier Lifecycle
//!
//! A draft gets a **pending** identifier (`o8-pending-<token>`) from
//! [`DeclarationBuilder::build`]. After the serialized bytes are durably
//! stored, the identifier is upgraded to its **published** form
//! (`o8-<address>`), a pure function of the content address. See [`ident`].

pub mod builder;
pub mod declaration;
pub mod error;
pub mod ident;
pub mod schema;
pub mod types;

pub use builder::DeclarationBuilder;
pub use declaration::{
    AiContribution, AiModel, Artist, AudioFingerprint, Collaborator, Contributor, CreativeStack,
    Declaration, Identity, ProductionIntelligence, Provenance, Revision, SampleReference,
    SampleSource, SourceMaterial, Stem, DECLARATION_VERSION,
};
pub use error::{FieldError, FormatError, ValidationError};
pub use ident::{
    extract_content_address, is_pending, is_published, parse_id, pending_id, published_id,
    ParsedId, PENDING_PREFIX, PUBLISHED_PREFIX,
};
pub use schema::{from_json_bytes, transparency_score, validate_declaration};
pub use types::{AddressKind, ContentAddress, FingerprintHash, WalletAddress};
