//! Validated newtypes for opus8.
//!
//! Addresses, wallets, and digests are newtypes so a malformed value
//! cannot flow past its parse site.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FormatError;

/// The two canonical textual forms of a content address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// `Qm…`: base58btc multihash, 46 characters.
    V0,
    /// `b…`: lowercase base32, 59 characters.
    V1,
}

/// A content address: a deterministic identifier derived from a content
/// hash, used both to locate and to verify immutable stored bytes.
///
/// Only the two canonical textual forms are accepted. The inner string is
/// never exposed mutably, so a constructed address is always well-formed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Parse a textual content address, accepting either canonical form.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(FormatError::InvalidAddress(s.to_string()))
        }
    }

    /// Check whether a string is a canonical content address.
    pub fn is_valid(s: &str) -> bool {
        is_v0(s) || is_v1(s)
    }

    /// Which canonical form this address uses.
    pub fn kind(&self) -> AddressKind {
        if self.0.starts_with("Qm") {
            AddressKind::V0
        } else {
            AddressKind::V1
        }
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `Qm` + 44 base58btc characters, decoding to a 34-byte sha2-256 multihash.
fn is_v0(s: &str) -> bool {
    if s.len() != 46 || !s.starts_with("Qm") {
        return false;
    }
    match bs58::decode(s).into_vec() {
        Ok(bytes) => bytes.len() == 34 && bytes[0] == 0x12 && bytes[1] == 0x20,
        Err(_) => false,
    }
}

/// `b` + 58 lowercase base32 characters (sha2-256 payload length).
fn is_v1(s: &str) -> bool {
    s.len() == 59
        && s.starts_with('b')
        && s[1..]
            .bytes()
            .all(|c| c.is_ascii_lowercase() || (b'2'..=b'7').contains(&c))
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", self.0)
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentAddress {
    type Error = FormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ContentAddress> for String {
    fn from(addr: ContentAddress) -> Self {
        addr.0
    }
}

impl std::str::FromStr for ContentAddress {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A wallet address: `0x` followed by 40 hex characters.
///
/// Stored lowercased so comparisons are canonical.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse a wallet address (case-insensitive input, lowercased output).
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let ok = s.len() == 42
            && s.starts_with("0x")
            && s[2..].bytes().all(|c| c.is_ascii_hexdigit());
        if ok {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(FormatError::InvalidWallet(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = FormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(w: WalletAddress) -> Self {
        w.0
    }
}

/// A 64-hex-character SHA-256 digest of an audio file's raw bytes.
///
/// Stored lowercased so comparisons are canonical.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FingerprintHash(String);

impl FingerprintHash {
    /// Parse a 64-hex-character digest (case-insensitive input).
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if s.len() == 64 && s.bytes().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(FormatError::InvalidHash(s.to_string()))
        }
    }

    /// Encode a raw 32-byte digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FingerprintHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FingerprintHash({}…)", &self.0[..16])
    }
}

impl fmt::Display for FingerprintHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FingerprintHash {
    type Error = FormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FingerprintHash> for String {
    fn from(h: FingerprintHash) -> Self {
        h.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CID_V0: &str = "QmbFMke1KXqnYyBBWxB74N4c5SBnJMVAiMNRcGu6x1AwQH";
    const CID_V1: &str = "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku";

    #[test]
    fn test_parse_v0() {
        let addr = ContentAddress::parse(CID_V0).unwrap();
        assert_eq!(addr.kind(), AddressKind::V0);
        assert_eq!(addr.as_str(), CID_V0);
    }

    #[test]
    fn test_parse_v1() {
        let addr = ContentAddress::parse(CID_V1).unwrap();
        assert_eq!(addr.kind(), AddressKind::V1);
    }

    #[test]
    fn test_reject_malformed_addresses() {
        for bad in [
            "",
            "Qm",
            "QmTooShort",
            "notanaddress",
            // Right length, but 'l' is not in the base58 alphabet
            "Qmllllllllllllllllllllllllllllllllllllllllllll",
            // v1 with uppercase
            "bAfkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku",
        ] {
            assert!(ContentAddress::parse(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn test_address_serde_roundtrip() {
        let addr = ContentAddress::parse(CID_V0).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{CID_V0}\""));
        let back: ContentAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_address_serde_rejects_invalid() {
        let result: Result<ContentAddress, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_wallet_parse_and_normalize() {
        let w = WalletAddress::parse("0xAbCd000000000000000000000000000000001234").unwrap();
        assert_eq!(w.as_str(), "0xabcd000000000000000000000000000000001234");
    }

    #[test]
    fn test_wallet_rejects_malformed() {
        for bad in ["", "0x123", "abcd000000000000000000000000000000001234ab",
                    "0xzzcd000000000000000000000000000000001234"] {
            assert!(WalletAddress::parse(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn test_fingerprint_hash() {
        let h = FingerprintHash::parse(&"AA".repeat(32)).unwrap();
        assert_eq!(h.as_str(), "aa".repeat(32));
        assert!(FingerprintHash::parse("aa").is_err());
        assert!(FingerprintHash::parse(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_fingerprint_hash_from_digest() {
        let h = FingerprintHash::from_digest(&[0xab; 32]);
        assert_eq!(h.as_str(), "ab".repeat(32));
    }
}
