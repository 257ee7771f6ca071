//! Proptest generators for property-based testing.

use proptest::prelude::*;

use opus8_core::{
    AiContribution, AudioFingerprint, ContentAddress, Declaration, DeclarationBuilder,
    FingerprintHash, WalletAddress,
};

/// Generate a valid CIDv0 content address from random digest bytes.
pub fn content_address() -> impl Strategy<Value = ContentAddress> {
    any::<[u8; 32]>().prop_map(|digest| {
        let mut multihash = Vec::with_capacity(34);
        multihash.push(0x12);
        multihash.push(0x20);
        multihash.extend_from_slice(&digest);
        ContentAddress::parse(&bs58::encode(multihash).into_string())
            .expect("multihash encodes to canonical CIDv0")
    })
}

/// Generate a valid wallet address.
pub fn wallet_address() -> impl Strategy<Value = WalletAddress> {
    any::<[u8; 20]>().prop_map(|bytes| {
        WalletAddress::parse(&format!("0x{}", hex::encode(bytes))).expect("40 hex chars")
    })
}

/// Generate a fingerprint hash from random digest bytes.
pub fn fingerprint_hash() -> impl Strategy<Value = FingerprintHash> {
    any::<[u8; 32]>().prop_map(|digest| FingerprintHash::from_digest(&digest))
}

/// Generate a fraction in [0, 1].
pub fn fraction() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

/// Generate per-phase AI contribution fractions.
pub fn ai_contribution() -> impl Strategy<Value = AiContribution> {
    (fraction(), fraction(), fraction(), fraction(), fraction()).prop_map(
        |(composition, arrangement, production, mixing, mastering)| AiContribution {
            composition,
            arrangement,
            production,
            mixing,
            mastering,
        },
    )
}

/// Generate a plausible audio fingerprint.
pub fn audio_fingerprint() -> impl Strategy<Value = AudioFingerprint> {
    (
        fingerprint_hash(),
        1u64..=4_000_000u64, // up to ~66 minutes
        prop_oneof![Just("wav"), Just("mp3"), Just("flac"), Just("ogg")],
        prop::option::of(prop_oneof![Just(44_100u32), Just(48_000), Just(96_000)]),
        prop::option::of(prop_oneof![Just(16u16), Just(24), Just(32)]),
    )
        .prop_map(
            |(sha256, duration_ms, format, sample_rate, bit_depth)| AudioFingerprint {
                sha256,
                duration_ms,
                format: format.to_string(),
                sample_rate,
                bit_depth,
            },
        )
}

/// Generate a non-empty human name.
pub fn person_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,30}".prop_map(String::from)
}

/// Parameters for generating a declaration.
#[derive(Debug, Clone)]
pub struct DeclarationParams {
    pub artist: String,
    pub wallet: Option<WalletAddress>,
    pub daws: Vec<String>,
    pub methodology: String,
    pub ai_contribution: AiContribution,
    pub provenance_root: Option<ContentAddress>,
    pub fingerprint: AudioFingerprint,
}

impl Arbitrary for DeclarationParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            person_name(),
            prop::option::of(wallet_address()),
            prop::collection::vec(person_name(), 0..3),
            person_name(),
            ai_contribution(),
            prop::option::of(content_address()),
            audio_fingerprint(),
        )
            .prop_map(
                |(artist, wallet, daws, methodology, ai, root, fingerprint)| DeclarationParams {
                    artist,
                    wallet,
                    daws,
                    methodology,
                    ai_contribution: ai,
                    provenance_root: root,
                    fingerprint,
                },
            )
            .boxed()
    }
}

/// Build a declaration from parameters. Always schema-valid.
pub fn declaration_from_params(params: &DeclarationParams) -> Declaration {
    let mut b = DeclarationBuilder::new();
    b.artist(&params.artist).expect("artist");
    if let Some(wallet) = &params.wallet {
        b.artist_wallet(wallet.as_str()).expect("wallet");
    }
    for daw in &params.daws {
        b.add_daw(daw).expect("daw");
    }
    b.methodology(&params.methodology).expect("methodology");
    b.ai_contribution(params.ai_contribution).expect("fractions");
    if let Some(root) = &params.provenance_root {
        b.provenance_root(root.as_str()).expect("root");
    }
    b.fingerprint(params.fingerprint.clone()).expect("fingerprint");
    b.build().expect("build")
}
