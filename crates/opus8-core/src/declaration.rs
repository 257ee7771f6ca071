//! Declaration: the complete creative-provenance record for an audio work.
//!
//! A declaration is immutable once built. Changes are represented as new
//! declarations carrying a revision-history entry pointing at the previous
//! content address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ContentAddress, FingerprintHash, WalletAddress};

/// The current declaration schema version.
pub const DECLARATION_VERSION: &str = "1.0.0";

/// The root record: who made the work, with what, and how much of it
/// was machine-generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Textual identifier: pending (`o8-pending-<token>`) before durable
    /// publication, published (`o8-<address>`) after.
    pub declaration_id: String,

    /// Fixed schema revision tag.
    pub version: String,

    /// Primary artist, collaborators, and contributors.
    pub identity: Identity,

    /// Tools and models used in production.
    pub creative_stack: CreativeStack,

    /// AI contribution disclosure per production phase.
    pub production_intelligence: ProductionIntelligence,

    /// Source lineage: what this work was derived from.
    #[serde(default)]
    pub provenance: Provenance,

    /// Ordered revision log, oldest first.
    #[serde(default)]
    pub revision_history: Vec<Revision>,

    /// Fingerprint of the audio file this declaration describes.
    pub audio_fingerprint: AudioFingerprint,

    /// When the draft was started (ISO-8601).
    pub created_at: DateTime<Utc>,

    /// When the record was last modified (ISO-8601).
    pub updated_at: DateTime<Utc>,
}

impl Declaration {
    /// Serialize to the canonical JSON wire form.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Every content address referenced by the provenance section, in
    /// document order with duplicates removed.
    pub fn provenance_addresses(&self) -> Vec<&ContentAddress> {
        let p = &self.provenance;
        let mut seen: Vec<&ContentAddress> = Vec::new();
        let all = p
            .root
            .iter()
            .chain(p.source_materials.iter().map(|s| &s.address))
            .chain(p.sample_references.iter().map(|s| &s.address))
            .chain(p.stems.iter().map(|s| &s.address));
        for addr in all {
            if !seen.contains(&addr) {
                seen.push(addr);
            }
        }
        seen
    }
}

/// Who made the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub artist: Artist,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

/// The primary artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub wallet: Option<WalletAddress>,
    /// Opaque attestation over the declaration, supplied externally.
    pub signature: Option<String>,
}

/// A collaborator with an optional revenue split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    pub role: String,
    pub wallet: Option<WalletAddress>,
    /// Revenue share in [0, 1].
    pub split: Option<f64>,
    pub signature: Option<String>,
}

/// A non-splitting contributor (session player, engineer, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub role: String,
    pub contribution: String,
}

/// Tools, models, and source samples used in production.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreativeStack {
    #[serde(default)]
    pub daws: Vec<String>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub hardware: Vec<String>,
    #[serde(default)]
    pub ai_models: Vec<AiModel>,
    #[serde(default)]
    pub samples: Vec<SampleSource>,
}

/// An AI model used somewhere in the production chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub name: String,
    pub provider: String,
    pub version: Option<String>,
    /// What the model was used for.
    pub usage: String,
}

/// A sample or sample pack used in the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSource {
    pub name: String,
    pub source: String,
    pub license: Option<String>,
}

/// The five production phases tracked for AI disclosure.
pub const PHASES: [&str; 5] = [
    "composition",
    "arrangement",
    "production",
    "mixing",
    "mastering",
];

/// AI contribution fractions per production phase, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AiContribution {
    pub composition: f64,
    pub arrangement: f64,
    pub production: f64,
    pub mixing: f64,
    pub mastering: f64,
}

impl AiContribution {
    /// Phase fractions paired with their names, in canonical order.
    pub fn phases(&self) -> [(&'static str, f64); 5] {
        [
            ("composition", self.composition),
            ("arrangement", self.arrangement),
            ("production", self.production),
            ("mixing", self.mixing),
            ("mastering", self.mastering),
        ]
    }
}

/// How the work was made, in the creator's words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionIntelligence {
    pub ai_contribution: AiContribution,
    /// Required free-text description of the production methodology.
    pub methodology: String,
    pub notes: Option<String>,
}

/// Source lineage: what this work was derived from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provenance {
    /// The root work this derives from, if any.
    pub root: Option<ContentAddress>,
    #[serde(default)]
    pub source_materials: Vec<SourceMaterial>,
    #[serde(default)]
    pub sample_references: Vec<SampleReference>,
    #[serde(default)]
    pub stems: Vec<Stem>,
}

/// A source material with its relationship to this work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMaterial {
    pub address: ContentAddress,
    pub description: String,
    /// Relationship tag, e.g. `remix-of`, `sampled-from`.
    pub relationship: String,
}

/// A referenced sample, optionally with a position in the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReference {
    pub address: ContentAddress,
    pub name: String,
    /// Where in the work the sample appears, e.g. `1:32`.
    pub timestamp: Option<String>,
}

/// A published stem of the work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stem {
    pub address: ContentAddress,
    pub name: String,
    /// Stem type tag, e.g. `vocals`, `drums`.
    pub stem_type: String,
}

/// One entry in the revision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub changes: String,
    /// Content address of the superseded declaration, if it was published.
    pub prev_address: Option<ContentAddress>,
}

/// Cryptographic hash plus basic technical metadata identifying an audio
/// file's content and integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFingerprint {
    /// SHA-256 of the raw file bytes, 64 hex characters.
    pub sha256: FingerprintHash,
    /// Duration in milliseconds, positive.
    pub duration_ms: u64,
    /// Container format, e.g. `wav`.
    pub format: String,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CID_A: &str = "QmeaiUHQuE6e2QJsCM4MTRQx5R2cCWXQkNLXKasP9fVGMJ";
    const CID_B: &str = "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4";

    fn addr(s: &str) -> ContentAddress {
        ContentAddress::parse(s).unwrap()
    }

    #[test]
    fn test_provenance_addresses_dedup_in_order() {
        let provenance = Provenance {
            root: Some(addr(CID_A)),
            source_materials: vec![SourceMaterial {
                address: addr(CID_B),
                description: "original mix".into(),
                relationship: "remix-of".into(),
            }],
            sample_references: vec![],
            stems: vec![Stem {
                // Same as root, must not be double-counted
                address: addr(CID_A),
                name: "drums".into(),
                stem_type: "drums".into(),
            }],
        };

        let decl = Declaration {
            declaration_id: "o8-pending-abc".into(),
            version: DECLARATION_VERSION.into(),
            identity: Identity {
                artist: Artist {
                    name: "test".into(),
                    wallet: None,
                    signature: None,
                },
                collaborators: vec![],
                contributors: vec![],
            },
            creative_stack: CreativeStack::default(),
            production_intelligence: ProductionIntelligence {
                ai_contribution: AiContribution::default(),
                methodology: "all human".into(),
                notes: None,
            },
            provenance,
            revision_history: vec![],
            audio_fingerprint: AudioFingerprint {
                sha256: FingerprintHash::parse(&"ab".repeat(32)).unwrap(),
                duration_ms: 1000,
                format: "wav".into(),
                sample_rate: None,
                bit_depth: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let addrs = decl.provenance_addresses();
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0].as_str(), CID_A);
        assert_eq!(addrs[1].as_str(), CID_B);
    }

    #[test]
    fn test_json_roundtrip() {
        let fp = AudioFingerprint {
            sha256: FingerprintHash::parse(&"cd".repeat(32)).unwrap(),
            duration_ms: 180_000,
            format: "flac".into(),
            sample_rate: Some(44_100),
            bit_depth: Some(16),
        };
        let json = serde_json::to_string(&fp).unwrap();
        let back: AudioFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }

    #[test]
    fn test_timestamps_serialize_iso8601() {
        let rev = Revision {
            version: "1.1".into(),
            timestamp: "2026-01-15T10:30:00Z".parse().unwrap(),
            changes: "remaster".into(),
            prev_address: None,
        };
        let json = serde_json::to_string(&rev).unwrap();
        assert!(json.contains("2026-01-15T10:30:00Z"));
    }
}
