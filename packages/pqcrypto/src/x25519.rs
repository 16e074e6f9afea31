//! X25519 key helpers for REALITY-style transport keys
//!
//! Keys travel as URL-safe Base64 without padding, the same encoding the
//! ML-DSA-65 path uses.

use crate::codec;
use crate::error::{KeygenError, Result};
use panelkey_common::fingerprint;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

/// X25519 key length in bytes
pub const X25519_KEY_LEN: usize = 32;

/// Encoded X25519 key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X25519Keys {
    /// Private scalar, URL-safe Base64
    pub private_key: String,
    /// Public key, URL-safe Base64
    pub public_key: String,
}

/// Derive the public key for an encoded private key
///
/// Missing padding is restored before decoding.
///
/// # Errors
///
/// Returns [`KeygenError::InvalidKey`] if the text does not decode to exactly
/// 32 bytes.
pub fn public_key_from_private(private_b64: &str) -> Result<String> {
    let mut bytes = codec::decode_exact::<X25519_KEY_LEN>(private_b64).map_err(|err| {
        tracing::debug!("Rejected X25519 private key: {err}");
        KeygenError::invalid_key("invalid private key")
    })?;

    let secret = StaticSecret::from(bytes);
    bytes.zeroize();

    Ok(codec::encode(PublicKey::from(&secret).as_bytes()))
}

/// Generate a fresh X25519 key pair from the OS CSPRNG
///
/// # Errors
///
/// Returns [`KeygenError::Environment`] if the entropy source fails.
pub fn generate() -> Result<X25519Keys> {
    let mut bytes = [0u8; X25519_KEY_LEN];
    getrandom::fill(&mut bytes)
        .map_err(|e| KeygenError::environment(format!("secure random source failed: {e}")))?;

    let secret = StaticSecret::from(bytes);
    bytes.zeroize();
    let public = PublicKey::from(&secret);

    tracing::info!("Generated X25519 key pair (public_key: {})", fingerprint(public.as_bytes()));

    Ok(X25519Keys {
        private_key: codec::encode(secret.as_bytes()),
        public_key: codec::encode(public.as_bytes()),
    })
}
