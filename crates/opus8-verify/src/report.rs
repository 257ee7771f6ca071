//! Verification report: the audit artifact.
//!
//! One sub-result per executed check plus an overall verdict. A check
//! that was not requested is absent from the report; absent is never
//! counted as a failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opus8_core::ContentAddress;
use opus8_fingerprint::FingerprintReport;

/// The outcome of one verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// The reference as given by the caller.
    pub reference: String,
    /// The normalized content address the record was fetched from.
    pub address: ContentAddress,
    /// Overall verdict: schema-valid AND every executed check valid.
    pub valid: bool,
    pub checks: CheckResults,
    pub verified_at: DateTime<Utc>,
}

/// Per-check sub-results. Only `schema` always runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResults {
    pub schema: SchemaCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<FingerprintReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signatures: Option<SignatureCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ProvenanceCheck>,
}

impl CheckResults {
    /// A report containing only a schema result.
    pub fn schema_only(schema: SchemaCheck) -> Self {
        Self {
            schema,
            identity: None,
            fingerprint: None,
            signatures: None,
            provenance: None,
        }
    }

    /// Conjunction of the schema check and every executed check.
    pub fn all_valid(&self) -> bool {
        self.schema.valid
            && self.identity.as_ref().map_or(true, |c| c.valid)
            && self.fingerprint.as_ref().map_or(true, |c| c.valid)
            && self.signatures.as_ref().map_or(true, |c| c.valid)
            && self.provenance.as_ref().map_or(true, |c| c.valid)
    }
}

/// Result of the mandatory schema check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaCheck {
    pub valid: bool,
    /// Field-qualified violation messages, empty when valid.
    pub errors: Vec<String>,
}

/// Result of the identity-consistency check.
///
/// Only present when the fetched record carries a published-form ID;
/// pending-form IDs are exempt (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityCheck {
    /// True iff the embedded address equals the fetch address.
    pub valid: bool,
    pub embedded_address: ContentAddress,
    pub fetched_address: ContentAddress,
}

/// Signature presence for one wallet-bearing party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    /// Wallet present and a signature is attached.
    Verified,
    /// Wallet present but no signature: a named failure.
    Missing,
    /// No wallet: the party is untracked, neither verified nor failed.
    Untracked,
}

/// One party in the signature check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySignature {
    pub name: String,
    /// `artist` for the primary artist, else the collaborator's role.
    pub role: String,
    pub status: SignatureStatus,
}

/// Result of the signature check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureCheck {
    /// True iff no party is `Missing`.
    pub valid: bool,
    pub parties: Vec<PartySignature>,
}

/// Result of the provenance existence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceCheck {
    /// True iff every referenced address resolved.
    pub valid: bool,
    pub sources_checked: usize,
    pub sources_valid: usize,
    /// Addresses that failed the existence probe.
    pub missing: Vec<ContentAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_ok() -> SchemaCheck {
        SchemaCheck {
            valid: true,
            errors: vec![],
        }
    }

    #[test]
    fn test_absent_checks_do_not_fail_the_report() {
        let checks = CheckResults::schema_only(schema_ok());
        assert!(checks.all_valid());
    }

    #[test]
    fn test_any_executed_failure_flips_the_verdict() {
        let mut checks = CheckResults::schema_only(schema_ok());
        checks.provenance = Some(ProvenanceCheck {
            valid: false,
            sources_checked: 3,
            sources_valid: 2,
            missing: vec![],
        });
        assert!(!checks.all_valid());
    }

    #[test]
    fn test_unrequested_checks_are_omitted_from_json() {
        let checks = CheckResults::schema_only(schema_ok());
        let json = serde_json::to_string(&checks).unwrap();
        assert!(json.contains("schema"));
        assert!(!json.contains("fingerprint"));
        assert!(!json.contains("provenance"));
    }
}
