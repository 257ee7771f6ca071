//! # opus8 Verify
//!
//! Multi-check verification pipeline for opus8 declarations: fetch a
//! record by any accepted reference shape, then run the mandatory schema
//! check plus opt-in identity, fingerprint, signature, and provenance
//! checks, producing a structured [`VerificationReport`].
//!
//! Failed checks are data; the pipeline errors only when verification
//! itself cannot run (bad reference, unreachable store, unreadable
//! audio file).

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{VerificationEngine, VerifyOptions};
pub use error::{Result, VerifyError};
pub use report::{
    CheckResults, IdentityCheck, PartySignature, ProvenanceCheck, SchemaCheck, SignatureCheck,
    SignatureStatus, VerificationReport,
};
