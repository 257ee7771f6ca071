//! Declaration builder: a mutable accumulator with per-field validation.
//!
//! Each mutator validates only the fields it touches and fails fast with a
//! localized error, leaving the builder otherwise usable. `build()` runs
//! the presence checks and one full-schema pass, then yields the immutable
//! declaration with a pending identifier. A builder produces at most one
//! declaration: `build` consumes it.

use chrono::{DateTime, Utc};

use crate::declaration::{
    AiContribution, AiModel, Artist, AudioFingerprint, Collaborator, Contributor, CreativeStack,
    Declaration, Identity, ProductionIntelligence, Provenance, Revision, SampleReference,
    SampleSource, SourceMaterial, Stem, DECLARATION_VERSION,
};
use crate::error::{FieldError, ValidationError};
use crate::ident;
use crate::schema::validate_declaration;
use crate::types::{ContentAddress, WalletAddress};

type Result<T> = std::result::Result<T, ValidationError>;

/// Accumulates declaration fields with local validation.
#[derive(Debug)]
pub struct DeclarationBuilder {
    artist_name: Option<String>,
    artist_wallet: Option<WalletAddress>,
    artist_signature: Option<String>,
    collaborators: Vec<Collaborator>,
    contributors: Vec<Contributor>,
    stack: CreativeStack,
    ai_contribution: AiContribution,
    methodology: Option<String>,
    notes: Option<String>,
    provenance: Provenance,
    revision_history: Vec<Revision>,
    fingerprint: Option<AudioFingerprint>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DeclarationBuilder {
    /// Start an empty draft.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            artist_name: None,
            artist_wallet: None,
            artist_signature: None,
            collaborators: Vec::new(),
            contributors: Vec::new(),
            stack: CreativeStack::default(),
            ai_contribution: AiContribution::default(),
            methodology: None,
            notes: None,
            provenance: Provenance::default(),
            revision_history: Vec::new(),
            fingerprint: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Seed a new draft from a published declaration, recording the
    /// revision in the history.
    pub fn revise(
        prev: &Declaration,
        prev_address: &ContentAddress,
        version: &str,
        changes: &str,
    ) -> Result<Self> {
        let mut errors = Vec::new();
        if version.trim().is_empty() {
            errors.push(FieldError::new("revision.version", "must not be empty"));
        }
        if changes.trim().is_empty() {
            errors.push(FieldError::new("revision.changes", "must not be empty"));
        }
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let now = Utc::now();
        let mut history = prev.revision_history.clone();
        history.push(Revision {
            version: version.trim().to_string(),
            timestamp: now,
            changes: changes.trim().to_string(),
            prev_address: Some(prev_address.clone()),
        });

        Ok(Self {
            artist_name: Some(prev.identity.artist.name.clone()),
            artist_wallet: prev.identity.artist.wallet.clone(),
            artist_signature: prev.identity.artist.signature.clone(),
            collaborators: prev.identity.collaborators.clone(),
            contributors: prev.identity.contributors.clone(),
            stack: prev.creative_stack.clone(),
            ai_contribution: prev.production_intelligence.ai_contribution,
            methodology: Some(prev.production_intelligence.methodology.clone()),
            notes: prev.production_intelligence.notes.clone(),
            provenance: prev.provenance.clone(),
            revision_history: history,
            fingerprint: Some(prev.audio_fingerprint.clone()),
            created_at: prev.created_at,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────

    /// Set the primary artist name.
    pub fn artist(&mut self, name: &str) -> Result<&mut Self> {
        let name = require_text("identity.artist.name", name)?;
        self.artist_name = Some(name);
        Ok(self.touch())
    }

    /// Set the primary artist's wallet.
    pub fn artist_wallet(&mut self, wallet: &str) -> Result<&mut Self> {
        let wallet = WalletAddress::parse(wallet)
            .map_err(|e| ValidationError::single("identity.artist.wallet", e.to_string()))?;
        self.artist_wallet = Some(wallet);
        Ok(self.touch())
    }

    /// Attach the primary artist's signature (opaque attestation).
    pub fn artist_signature(&mut self, signature: &str) -> Result<&mut Self> {
        let sig = require_text("identity.artist.signature", signature)?;
        self.artist_signature = Some(sig);
        Ok(self.touch())
    }

    /// Add a collaborator with an optional wallet and revenue split.
    pub fn add_collaborator(
        &mut self,
        name: &str,
        role: &str,
        wallet: Option<&str>,
        split: Option<f64>,
    ) -> Result<&mut Self> {
        let base = format!("identity.collaborators[{}]", self.collaborators.len());
        let name = require_text(&format!("{base}.name"), name)?;
        let role = require_text(&format!("{base}.role"), role)?;
        let wallet = wallet
            .map(|w| {
                WalletAddress::parse(w)
                    .map_err(|e| ValidationError::single(format!("{base}.wallet"), e.to_string()))
            })
            .transpose()?;
        if let Some(s) = split {
            if !s.is_finite() || !(0.0..=1.0).contains(&s) {
                return Err(ValidationError::single(
                    format!("{base}.split"),
                    format!("must be in [0, 1], got {s}"),
                ));
            }
        }
        self.collaborators.push(Collaborator {
            name,
            role,
            wallet,
            split,
            signature: None,
        });
        Ok(self.touch())
    }

    /// Attach a signature to an already-added collaborator, by name.
    pub fn collaborator_signature(&mut self, name: &str, signature: &str) -> Result<&mut Self> {
        let sig = require_text("identity.collaborators.signature", signature)?;
        let found = self
            .collaborators
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                ValidationError::single(
                    "identity.collaborators",
                    format!("no collaborator named \"{name}\""),
                )
            })?;
        found.signature = Some(sig);
        Ok(self.touch())
    }

    /// Add a non-splitting contributor.
    pub fn add_contributor(
        &mut self,
        name: &str,
        role: &str,
        contribution: &str,
    ) -> Result<&mut Self> {
        let base = format!("identity.contributors[{}]", self.contributors.len());
        let name = require_text(&format!("{base}.name"), name)?;
        let role = require_text(&format!("{base}.role"), role)?;
        let contribution = require_text(&format!("{base}.contribution"), contribution)?;
        self.contributors.push(Contributor {
            name,
            role,
            contribution,
        });
        Ok(self.touch())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Creative stack
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_daw(&mut self, name: &str) -> Result<&mut Self> {
        let name = require_text("creative_stack.daws", name)?;
        self.stack.daws.push(name);
        Ok(self.touch())
    }

    pub fn add_plugin(&mut self, name: &str) -> Result<&mut Self> {
        let name = require_text("creative_stack.plugins", name)?;
        self.stack.plugins.push(name);
        Ok(self.touch())
    }

    pub fn add_hardware(&mut self, name: &str) -> Result<&mut Self> {
        let name = require_text("creative_stack.hardware", name)?;
        self.stack.hardware.push(name);
        Ok(self.touch())
    }

    /// Disclose an AI model used in production.
    pub fn add_ai_model(
        &mut self,
        name: &str,
        provider: &str,
        version: Option<&str>,
        usage: &str,
    ) -> Result<&mut Self> {
        let base = format!("creative_stack.ai_models[{}]", self.stack.ai_models.len());
        let name = require_text(&format!("{base}.name"), name)?;
        let provider = require_text(&format!("{base}.provider"), provider)?;
        let usage = require_text(&format!("{base}.usage"), usage)?;
        self.stack.ai_models.push(AiModel {
            name,
            provider,
            version: version.map(|v| v.trim().to_string()),
            usage,
        });
        Ok(self.touch())
    }

    /// Disclose a sample or sample pack.
    pub fn add_sample(
        &mut self,
        name: &str,
        source: &str,
        license: Option<&str>,
    ) -> Result<&mut Self> {
        let base = format!("creative_stack.samples[{}]", self.stack.samples.len());
        let name = require_text(&format!("{base}.name"), name)?;
        let source = require_text(&format!("{base}.source"), source)?;
        self.stack.samples.push(SampleSource {
            name,
            source,
            license: license.map(|l| l.trim().to_string()),
        });
        Ok(self.touch())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Production intelligence
    // ─────────────────────────────────────────────────────────────────────

    /// Set the per-phase AI contribution fractions.
    pub fn ai_contribution(&mut self, contribution: AiContribution) -> Result<&mut Self> {
        for (phase, value) in contribution.phases() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::single(
                    format!("production_intelligence.ai_contribution.{phase}"),
                    format!("must be in [0, 1], got {value}"),
                ));
            }
        }
        self.ai_contribution = contribution;
        Ok(self.touch())
    }

    /// Set the required methodology description.
    pub fn methodology(&mut self, text: &str) -> Result<&mut Self> {
        let text = require_text("production_intelligence.methodology", text)?;
        self.methodology = Some(text);
        Ok(self.touch())
    }

    /// Set optional free-text notes.
    pub fn notes(&mut self, text: &str) -> Result<&mut Self> {
        self.notes = Some(text.trim().to_string());
        Ok(self.touch())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Provenance
    // ─────────────────────────────────────────────────────────────────────

    /// Set the root content address this work derives from.
    pub fn provenance_root(&mut self, address: &str) -> Result<&mut Self> {
        let address = parse_address("provenance.root", address)?;
        self.provenance.root = Some(address);
        Ok(self.touch())
    }

    pub fn add_source_material(
        &mut self,
        address: &str,
        description: &str,
        relationship: &str,
    ) -> Result<&mut Self> {
        let base = format!(
            "provenance.source_materials[{}]",
            self.provenance.source_materials.len()
        );
        let address = parse_address(&format!("{base}.address"), address)?;
        let description = require_text(&format!("{base}.description"), description)?;
        let relationship = require_text(&format!("{base}.relationship"), relationship)?;
        self.provenance.source_materials.push(SourceMaterial {
            address,
            description,
            relationship,
        });
        Ok(self.touch())
    }

    pub fn add_sample_reference(
        &mut self,
        address: &str,
        name: &str,
        timestamp: Option<&str>,
    ) -> Result<&mut Self> {
        let base = format!(
            "provenance.sample_references[{}]",
            self.provenance.sample_references.len()
        );
        let address = parse_address(&format!("{base}.address"), address)?;
        let name = require_text(&format!("{base}.name"), name)?;
        self.provenance.sample_references.push(SampleReference {
            address,
            name,
            timestamp: timestamp.map(|t| t.trim().to_string()),
        });
        Ok(self.touch())
    }

    pub fn add_stem(&mut self, address: &str, name: &str, stem_type: &str) -> Result<&mut Self> {
        let base = format!("provenance.stems[{}]", self.provenance.stems.len());
        let address = parse_address(&format!("{base}.address"), address)?;
        let name = require_text(&format!("{base}.name"), name)?;
        let stem_type = require_text(&format!("{base}.stem_type"), stem_type)?;
        self.provenance.stems.push(Stem {
            address,
            name,
            stem_type,
        });
        Ok(self.touch())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fingerprint
    // ─────────────────────────────────────────────────────────────────────

    /// Attach the audio fingerprint (normally produced by the fingerprint
    /// engine).
    pub fn fingerprint(&mut self, fingerprint: AudioFingerprint) -> Result<&mut Self> {
        if fingerprint.duration_ms == 0 {
            return Err(ValidationError::single(
                "audio_fingerprint.duration_ms",
                "must be positive",
            ));
        }
        if fingerprint.format.trim().is_empty() {
            return Err(ValidationError::single(
                "audio_fingerprint.format",
                "must not be empty",
            ));
        }
        self.fingerprint = Some(fingerprint);
        Ok(self.touch())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────────────────

    /// Finalize the draft into an immutable, schema-valid declaration with
    /// a freshly minted pending identifier.
    ///
    /// Returns the complete list of violations on failure.
    pub fn build(self) -> Result<Declaration> {
        let mut errors = Vec::new();
        if self.artist_name.is_none() {
            errors.push(FieldError::new("identity.artist.name", "is required"));
        }
        if self.methodology.is_none() {
            errors.push(FieldError::new(
                "production_intelligence.methodology",
                "is required",
            ));
        }
        if self.fingerprint.is_none() {
            errors.push(FieldError::new("audio_fingerprint", "is required"));
        }
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let decl = Declaration {
            declaration_id: ident::pending_id(),
            version: DECLARATION_VERSION.to_string(),
            identity: Identity {
                artist: Artist {
                    name: self.artist_name.unwrap(),
                    wallet: self.artist_wallet,
                    signature: self.artist_signature,
                },
                collaborators: self.collaborators,
                contributors: self.contributors,
            },
            creative_stack: self.stack,
            production_intelligence: ProductionIntelligence {
                ai_contribution: self.ai_contribution,
                methodology: self.methodology.unwrap(),
                notes: self.notes.filter(|n| !n.is_empty()),
            },
            provenance: self.provenance,
            revision_history: self.revision_history,
            audio_fingerprint: self.fingerprint.unwrap(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        validate_declaration(&decl)?;
        Ok(decl)
    }

    fn touch(&mut self) -> &mut Self {
        self.updated_at = Utc::now();
        self
    }
}

impl Default for DeclarationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn require_text(path: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::single(path, "must not be empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_address(path: &str, value: &str) -> Result<ContentAddress> {
    ContentAddress::parse(value).map_err(|e| ValidationError::single(path, e.to_string()))
}
