//! Public-key extraction from heterogeneous key-pair shapes
//!
//! Each matcher handles one shape and is tried in [`MATCHERS`] order; the
//! first hit wins.

use crate::error::{KeygenError, Result};
use crate::module::RawKeyPair;

/// Field names that may hold the public key, most preferred first
pub const PUBLIC_KEY_FIELDS: &[&str] = &[
    "publicKey",
    "public_key",
    "public",
    "verify",
    "verificationKey",
    "verification_key",
    "pk",
];

/// Field that wraps a nested key pair
pub const NESTED_KEYPAIR_FIELD: &str = "keypair";

/// A single shape matcher
pub type Matcher = fn(&RawKeyPair) -> Option<&[u8]>;

/// Matchers in evaluation order
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("bare bytes", bare_bytes),
    ("named field", named_field),
    ("list element", first_list_bytes),
    ("nested keypair", nested_keypair),
];

/// The value itself is the public key
#[must_use]
pub fn bare_bytes(raw: &RawKeyPair) -> Option<&[u8]> {
    raw.as_bytes()
}

/// First [`PUBLIC_KEY_FIELDS`] entry that holds bytes
#[must_use]
pub fn named_field(raw: &RawKeyPair) -> Option<&[u8]> {
    PUBLIC_KEY_FIELDS
        .iter()
        .find_map(|name| raw.field(name).and_then(RawKeyPair::as_bytes))
}

/// First byte buffer in a list
#[must_use]
pub fn first_list_bytes(raw: &RawKeyPair) -> Option<&[u8]> {
    match raw {
        RawKeyPair::List(items) => items.iter().find_map(RawKeyPair::as_bytes),
        _ => None,
    }
}

/// Recurse into a `keypair` wrapper
#[must_use]
pub fn nested_keypair(raw: &RawKeyPair) -> Option<&[u8]> {
    raw.field(NESTED_KEYPAIR_FIELD).and_then(find_public_key)
}

fn find_public_key(raw: &RawKeyPair) -> Option<&[u8]> {
    MATCHERS.iter().find_map(|(_, matcher)| matcher(raw))
}

/// Extract the public verification key
///
/// # Errors
///
/// Returns [`KeygenError::PublicKeyExtraction`] if no matcher recognizes the
/// shape.
pub fn extract_public_key(raw: &RawKeyPair) -> Result<Vec<u8>> {
    find_public_key(raw).map(<[u8]>::to_vec).ok_or_else(|| {
        KeygenError::PublicKeyExtraction(format!("unrecognized {} result", raw.kind()))
    })
}
