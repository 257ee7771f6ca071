//! Full-aggregate schema validation.
//!
//! Address, wallet, and digest fields are validated by their newtypes at
//! parse time; this module checks everything the type system cannot:
//! non-empty text fields, fraction ranges, the version literal, and the
//! identifier form. Violations are collected, not short-circuited, so a
//! caller sees the complete picture in one pass.

use crate::declaration::{Declaration, DECLARATION_VERSION};
use crate::error::{FieldError, ValidationError};
use crate::ident;

/// Validate a complete declaration against every schema invariant.
pub fn validate_declaration(decl: &Declaration) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    // Version literal
    if decl.version != DECLARATION_VERSION {
        errors.push(FieldError::new(
            "version",
            format!("expected \"{DECLARATION_VERSION}\", got \"{}\"", decl.version),
        ));
    }

    // Identifier form
    if let Err(e) = ident::parse_id(&decl.declaration_id) {
        errors.push(FieldError::new("declaration_id", e.to_string()));
    }

    // Identity
    check_text(&mut errors, "identity.artist.name", &decl.identity.artist.name);
    for (i, c) in decl.identity.collaborators.iter().enumerate() {
        let base = format!("identity.collaborators[{i}]");
        check_text(&mut errors, &format!("{base}.name"), &c.name);
        check_text(&mut errors, &format!("{base}.role"), &c.role);
        if let Some(split) = c.split {
            check_fraction(&mut errors, &format!("{base}.split"), split);
        }
    }
    for (i, c) in decl.identity.contributors.iter().enumerate() {
        let base = format!("identity.contributors[{i}]");
        check_text(&mut errors, &format!("{base}.name"), &c.name);
        check_text(&mut errors, &format!("{base}.role"), &c.role);
        check_text(&mut errors, &format!("{base}.contribution"), &c.contribution);
    }

    // Creative stack
    let stack = &decl.creative_stack;
    for (list, name) in [
        (&stack.daws, "daws"),
        (&stack.plugins, "plugins"),
        (&stack.hardware, "hardware"),
    ] {
        for (i, entry) in list.iter().enumerate() {
            check_text(&mut errors, &format!("creative_stack.{name}[{i}]"), entry);
        }
    }
    for (i, m) in stack.ai_models.iter().enumerate() {
        let base = format!("creative_stack.ai_models[{i}]");
        check_text(&mut errors, &format!("{base}.name"), &m.name);
        check_text(&mut errors, &format!("{base}.provider"), &m.provider);
        check_text(&mut errors, &format!("{base}.usage"), &m.usage);
    }
    for (i, s) in stack.samples.iter().enumerate() {
        let base = format!("creative_stack.samples[{i}]");
        check_text(&mut errors, &format!("{base}.name"), &s.name);
        check_text(&mut errors, &format!("{base}.source"), &s.source);
    }

    // Production intelligence
    let pi = &decl.production_intelligence;
    for (phase, value) in pi.ai_contribution.phases() {
        check_fraction(
            &mut errors,
            &format!("production_intelligence.ai_contribution.{phase}"),
            value,
        );
    }
    check_text(
        &mut errors,
        "production_intelligence.methodology",
        &pi.methodology,
    );

    // Provenance (addresses validated by type)
    for (i, s) in decl.provenance.source_materials.iter().enumerate() {
        let base = format!("provenance.source_materials[{i}]");
        check_text(&mut errors, &format!("{base}.description"), &s.description);
        check_text(&mut errors, &format!("{base}.relationship"), &s.relationship);
    }
    for (i, s) in decl.provenance.sample_references.iter().enumerate() {
        check_text(
            &mut errors,
            &format!("provenance.sample_references[{i}].name"),
            &s.name,
        );
    }
    for (i, s) in decl.provenance.stems.iter().enumerate() {
        let base = format!("provenance.stems[{i}]");
        check_text(&mut errors, &format!("{base}.name"), &s.name);
        check_text(&mut errors, &format!("{base}.stem_type"), &s.stem_type);
    }

    // Revision history
    for (i, r) in decl.revision_history.iter().enumerate() {
        let base = format!("revision_history[{i}]");
        check_text(&mut errors, &format!("{base}.version"), &r.version);
        check_text(&mut errors, &format!("{base}.changes"), &r.changes);
    }

    // Fingerprint (hash validated by type)
    if decl.audio_fingerprint.duration_ms == 0 {
        errors.push(FieldError::new(
            "audio_fingerprint.duration_ms",
            "must be positive",
        ));
    }
    check_text(&mut errors, "audio_fingerprint.format", &decl.audio_fingerprint.format);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(errors))
    }
}

/// Parse untyped JSON bytes into a validated declaration.
///
/// Structural failures (unparseable JSON, malformed addresses) and schema
/// violations both surface as a [`ValidationError`].
pub fn from_json_bytes(bytes: &[u8]) -> Result<Declaration, ValidationError> {
    let decl: Declaration = serde_json::from_slice(bytes)
        .map_err(|e| ValidationError::single("$", e.to_string()))?;
    validate_declaration(&decl)?;
    Ok(decl)
}

fn check_text(errors: &mut Vec<FieldError>, path: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(path, "must not be empty"));
    }
}

fn check_fraction(errors: &mut Vec<FieldError>, path: &str, value: f64) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        errors.push(FieldError::new(path, format!("must be in [0, 1], got {value}")));
    }
}

/// Derived 0-100 summary rewarding disclosure depth.
///
/// Consumed by display surfaces; never part of validity.
pub fn transparency_score(decl: &Declaration) -> u8 {
    let stack = &decl.creative_stack;
    let pi = &decl.production_intelligence;
    let prov = &decl.provenance;

    let mut score = 0u32;
    // Methodology is required, so its presence is the baseline.
    score += 20;
    if !stack.daws.is_empty() || !stack.hardware.is_empty() {
        score += 10;
    }
    if !stack.plugins.is_empty() {
        score += 5;
    }
    if !stack.ai_models.is_empty() || pi.ai_contribution.phases().iter().all(|(_, v)| *v == 0.0) {
        // Either models are disclosed, or the work claims no AI at all.
        score += 15;
    }
    if !stack.samples.is_empty() {
        score += 5;
    }
    if pi.notes.is_some() {
        score += 5;
    }
    if decl.identity.artist.wallet.is_some() {
        score += 5;
    }
    if !decl.identity.collaborators.is_empty() {
        score += 5;
    }
    if !decl.identity.contributors.is_empty() {
        score += 5;
    }
    if prov.root.is_some() || !prov.source_materials.is_empty() {
        score += 10;
    }
    if !prov.stems.is_empty() {
        score += 5;
    }
    if !prov.sample_references.is_empty() {
        score += 5;
    }
    if !decl.revision_history.is_empty() {
        score += 5;
    }

    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DeclarationBuilder;
    use crate::declaration::AudioFingerprint;
    use crate::types::FingerprintHash;

    fn valid_declaration() -> Declaration {
        let mut b = DeclarationBuilder::new();
        b.artist("Mira Vale").unwrap();
        b.methodology("Composed and arranged by hand; AI-assisted mastering.")
            .unwrap();
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

    #[test]
    fn test_valid_declaration_passes() {
        let decl = valid_declaration();
        assert!(validate_declaration(&decl).is_ok());
    }

    #[test]
    fn test_collects_multiple_violations() {
        let mut decl = valid_declaration();
        decl.identity.artist.name = "   ".into();
        decl.production_intelligence.methodology = "".into();
        decl.production_intelligence.ai_contribution.mixing = 1.5;

        let err = validate_declaration(&decl).unwrap_err();
        let paths: Vec<&str> = err.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"identity.artist.name"));
        assert!(paths.contains(&"production_intelligence.methodology"));
        assert!(paths.contains(&"production_intelligence.ai_contribution.mixing"));
        assert_eq!(err.errors.len(), 3);
    }

    #[test]
    fn test_version_literal_enforced() {
        let mut decl = valid_declaration();
        decl.version = "0.9.0".into();
        let err = validate_declaration(&decl).unwrap_err();
        assert_eq!(err.errors[0].path, "version");
    }

    #[test]
    fn test_declaration_id_form_enforced() {
        let mut decl = valid_declaration();
        decl.declaration_id = "bogus".into();
        let err = validate_declaration(&decl).unwrap_err();
        assert_eq!(err.errors[0].path, "declaration_id");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut decl = valid_declaration();
        decl.audio_fingerprint.duration_ms = 0;
        let err = validate_declaration(&decl).unwrap_err();
        assert_eq!(err.errors[0].path, "audio_fingerprint.duration_ms");
    }

    #[test]
    fn test_nan_fraction_rejected() {
        let mut decl = valid_declaration();
        decl.production_intelligence.ai_contribution.composition = f64::NAN;
        assert!(validate_declaration(&decl).is_err());
    }

    #[test]
    fn test_json_bytes_roundtrip_revalidates() {
        let decl = valid_declaration();
        let bytes = decl.to_json_bytes().unwrap();
        let back = from_json_bytes(&bytes).unwrap();
        assert_eq!(back, decl);
    }

    #[test]
    fn test_json_bytes_rejects_garbage() {
        let err = from_json_bytes(b"not json").unwrap_err();
        assert_eq!(err.errors[0].path, "$");
    }

    #[test]
    fn test_json_bytes_rejects_bad_address() {
        let decl = valid_declaration();
        let mut value: serde_json::Value =
            serde_json::from_slice(&decl.to_json_bytes().unwrap()).unwrap();
        value["provenance"]["root"] = serde_json::json!("not-an-address");
        let bytes = serde_json::to_vec(&value).unwrap();
        assert!(from_json_bytes(&bytes).is_err());
    }

    #[test]
    fn test_transparency_score_rewards_disclosure() {
        let sparse = valid_declaration();
        let sparse_score = transparency_score(&sparse);

        let mut b = DeclarationBuilder::new();
        b.artist("Mira Vale").unwrap();
        b.artist_wallet("0x1234567890abcdef1234567890abcdef12345678")
            .unwrap();
        b.add_daw("Ableton Live 12").unwrap();
        b.add_plugin("Serum").unwrap();
        b.add_ai_model("MusicGen", "Meta", Some("1.5"), "melody sketches")
            .unwrap();
        b.add_contributor("Sam Ode", "engineer", "tracking session").unwrap();
        b.methodology("Hybrid human/AI production.").unwrap();
        b.notes("Stems available on request.").unwrap();
        b.fingerprint(AudioFingerprint {
            sha256: FingerprintHash::parse(&"ab".repeat(32)).unwrap(),
            duration_ms: 215_000,
            format: "wav".into(),
            sample_rate: None,
            bit_depth: None,
        })
        .unwrap();
        let rich = b.build().unwrap();

        assert!(transparency_score(&rich) > sparse_score);
        assert!(transparency_score(&rich) <= 100);
    }
}
