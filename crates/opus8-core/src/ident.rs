//! Declaration identifier lifecycle.
//!
//! Two identifier states:
//!
//! - **pending** (`o8-pending-<token>`): an unguessable random token handed
//!   out before the declaration bytes exist anywhere durable. Carries no
//!   relationship to content.
//! - **published** (`o8-<address>`): a pure function of the content address
//!   of the stored declaration bytes. Once published, identity can be
//!   re-verified by recomputing the address from refetched bytes.

use rand::RngCore;

use crate::error::FormatError;
use crate::types::ContentAddress;

/// Prefix of a published-form identifier.
pub const PUBLISHED_PREFIX: &str = "o8-";

/// Prefix of a pending-form identifier. Checked before [`PUBLISHED_PREFIX`]
/// when parsing, since `o8-` is a prefix of it.
pub const PENDING_PREFIX: &str = "o8-pending-";

/// A parsed declaration identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId {
    /// The prefix that matched.
    pub prefix: &'static str,
    /// Everything after the prefix: an opaque token (pending) or a
    /// content address (published).
    pub payload: String,
    pub is_pending: bool,
}

impl ParsedId {
    /// The embedded content address, if this is a published-form ID.
    pub fn address(&self) -> Option<ContentAddress> {
        if self.is_pending {
            None
        } else {
            ContentAddress::parse(&self.payload).ok()
        }
    }
}

/// Derive the published-form identifier for a content address.
pub fn published_id(address: &ContentAddress) -> String {
    format!("{PUBLISHED_PREFIX}{address}")
}

/// Mint a fresh pending-form identifier with a 128-bit random token.
pub fn pending_id() -> String {
    let mut token = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut token);
    format!("{PENDING_PREFIX}{}", hex::encode(token))
}

/// Parse a declaration identifier into its prefix and payload.
///
/// Fails with [`FormatError::UnknownIdForm`] if neither known prefix
/// matches, and with [`FormatError::InvalidAddress`] if a published-form
/// payload is not a canonical content address.
pub fn parse_id(id: &str) -> Result<ParsedId, FormatError> {
    if let Some(token) = id.strip_prefix(PENDING_PREFIX) {
        if token.is_empty() {
            return Err(FormatError::UnknownIdForm(id.to_string()));
        }
        return Ok(ParsedId {
            prefix: PENDING_PREFIX,
            payload: token.to_string(),
            is_pending: true,
        });
    }
    if let Some(payload) = id.strip_prefix(PUBLISHED_PREFIX) {
        let address = ContentAddress::parse(payload)?;
        return Ok(ParsedId {
            prefix: PUBLISHED_PREFIX,
            payload: address.as_str().to_string(),
            is_pending: false,
        });
    }
    Err(FormatError::UnknownIdForm(id.to_string()))
}

/// Structural check: is this a well-formed pending identifier?
pub fn is_pending(id: &str) -> bool {
    matches!(parse_id(id), Ok(p) if p.is_pending)
}

/// Structural check: is this a well-formed published identifier?
pub fn is_published(id: &str) -> bool {
    matches!(parse_id(id), Ok(p) if !p.is_pending)
}

/// Normalize any accepted reference shape to a bare content address.
///
/// Tries, in order: a bare canonical address, a published-form identifier,
/// a gateway-style URL whose path embeds an address. All three normalize
/// to the same bare address.
pub fn extract_content_address(input: &str) -> Result<ContentAddress, FormatError> {
    let input = input.trim();

    if let Ok(addr) = ContentAddress::parse(input) {
        return Ok(addr);
    }

    if let Ok(parsed) = parse_id(input) {
        if let Some(addr) = parsed.address() {
            return Ok(addr);
        }
        return Err(FormatError::NoAddress(input.to_string()));
    }

    // Gateway URL: first path segment that is a canonical address wins.
    if let Some((_scheme, rest)) = input.split_once("://") {
        for segment in rest.split('/').skip(1) {
            if let Ok(addr) = ContentAddress::parse(segment) {
                return Ok(addr);
            }
        }
    }

    Err(FormatError::NoAddress(input.to_string()))
}
