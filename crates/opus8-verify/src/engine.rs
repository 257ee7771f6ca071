//! The verification pipeline.
//!
//! Order: normalize reference, fetch, schema, identity, then the opt-in
//! checks (fingerprint, signatures, provenance). A schema failure
//! short-circuits everything downstream: no other check is attempted
//! against a record that does not parse as a declaration.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use opus8_core::{
    extract_content_address, parse_id, Collaborator, ContentAddress, Declaration,
};
use opus8_fingerprint::verify_fingerprint;
use opus8_store::ContentStore;

use crate::error::Result;
use crate::report::{
    CheckResults, IdentityCheck, PartySignature, ProvenanceCheck, SchemaCheck, SignatureCheck,
    SignatureStatus, VerificationReport,
};

/// Which opt-in checks to run.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Local audio file to fingerprint against the declared fingerprint.
    pub audio_path: Option<PathBuf>,
    pub check_signatures: bool,
    pub check_provenance: bool,
}

impl VerifyOptions {
    /// Every check that runs against the store alone. Fingerprinting
    /// needs a local audio file, so it stays opt-in via `audio_path`.
    pub fn all_remote_checks() -> Self {
        Self {
            audio_path: None,
            check_signatures: true,
            check_provenance: true,
        }
    }
}

/// Runs verification pipelines against one content store.
pub struct VerificationEngine<S> {
    store: Arc<S>,
}

impl<S: ContentStore> VerificationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Verify a declaration by reference.
    ///
    /// `reference` may be a bare content address, a published-form
    /// identifier, or a gateway URL; all normalize to the same address.
    /// Failed checks are reported, not raised; only infrastructure
    /// failures return `Err`.
    pub async fn verify(
        &self,
        reference: &str,
        options: &VerifyOptions,
    ) -> Result<VerificationReport> {
        let address = extract_content_address(reference)?;
        debug!(%address, "verifying");

        let bytes = self.store.fetch(&address).await?;

        let decl = match opus8_core::from_json_bytes(&bytes) {
            Ok(decl) => decl,
            Err(violations) => {
                // Nothing downstream is meaningful against an invalid record.
                let checks = CheckResults::schema_only(SchemaCheck {
                    valid: false,
                    errors: violations.messages(),
                });
                return Ok(VerificationReport {
                    reference: reference.to_string(),
                    address,
                    valid: false,
                    checks,
                    verified_at: Utc::now(),
                });
            }
        };

        let mut checks = CheckResults::schema_only(SchemaCheck {
            valid: true,
            errors: vec![],
        });

        checks.identity = identity_check(&decl, &address);

        if let Some(path) = &options.audio_path {
            checks.fingerprint = Some(verify_fingerprint(path, &decl.audio_fingerprint).await?);
        }

        if options.check_signatures {
            checks.signatures = Some(signature_check(&decl));
        }

        if options.check_provenance {
            checks.provenance = Some(self.provenance_check(&decl).await);
        }

        let valid = checks.all_valid();
        Ok(VerificationReport {
            reference: reference.to_string(),
            address,
            valid,
            checks,
            verified_at: Utc::now(),
        })
    }

    /// Probe every provenance-referenced address for existence. A probe
    /// failure counts the address as missing rather than aborting the run.
    async fn provenance_check(&self, decl: &Declaration) -> ProvenanceCheck {
        let addresses = decl.provenance_addresses();
        let mut valid = 0;
        let mut missing = Vec::new();
        for address in &addresses {
            if self.store.exists(address).await.unwrap_or(false) {
                valid += 1;
            } else {
                debug!(%address, "provenance source unresolved");
                missing.push((*address).clone());
            }
        }
        ProvenanceCheck {
            valid: missing.is_empty(),
            sources_checked: addresses.len(),
            sources_valid: valid,
            missing,
        }
    }
}

/// Identity check: the embedded published identifier must carry the
/// address the record was fetched from.
///
/// Pending-form identifiers are exempt (the check returns `None`): a
/// record cannot embed the address of its own serialized bytes before
/// those bytes exist.
fn identity_check(decl: &Declaration, fetched: &ContentAddress) -> Option<IdentityCheck> {
    // Schema validation already established a well-formed identifier.
    let parsed = parse_id(&decl.declaration_id).ok()?;
    let embedded = parsed.address()?;
    Some(IdentityCheck {
        valid: &embedded == fetched,
        embedded_address: embedded,
        fetched_address: fetched.clone(),
    })
}

fn party_status(wallet_present: bool, signature: &Option<String>) -> SignatureStatus {
    match (wallet_present, signature) {
        (true, Some(_)) => SignatureStatus::Verified,
        (true, None) => SignatureStatus::Missing,
        (false, _) => SignatureStatus::Untracked,
    }
}

/// Signature check over the artist and every collaborator. A party with
/// a wallet is expected to have signed; a party without one is merely
/// untracked.
fn signature_check(decl: &Declaration) -> SignatureCheck {
    let artist = &decl.identity.artist;
    let mut parties = vec![PartySignature {
        name: artist.name.clone(),
        role: "artist".to_string(),
        status: party_status(artist.wallet.is_some(), &artist.signature),
    }];
    for Collaborator {
        name,
        role,
        wallet,
        signature,
        ..
    } in &decl.identity.collaborators
    {
        parties.push(PartySignature {
            name: name.clone(),
            role: role.clone(),
            status: party_status(wallet.is_some(), signature),
        });
    }

    let valid = parties
        .iter()
        .all(|p| p.status != SignatureStatus::Missing);
    SignatureCheck { valid, parties }
}
