//! 32-byte ML-DSA-65 key generation seed

use crate::codec;
use crate::error::{CodecError, KeygenError, Result};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed length in bytes (FIPS 204 ξ)
pub const SEED_LEN: usize = 32;

/// Key generation seed, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a caller-supplied URL-safe Base64 seed
    ///
    /// # Errors
    ///
    /// Returns [`KeygenError::InvalidSeed`] for malformed text and
    /// [`KeygenError::InvalidSeedLength`] if it does not decode to exactly
    /// [`SEED_LEN`] bytes.
    pub fn from_base64url(text: &str) -> Result<Self> {
        match codec::decode_exact::<SEED_LEN>(text) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(CodecError::Length { expected, actual }) => {
                Err(KeygenError::InvalidSeedLength { expected, actual })
            }
            Err(err) => Err(KeygenError::InvalidSeed(err)),
        }
    }

    /// Draw a fresh seed from the operating system CSPRNG
    ///
    /// # Errors
    ///
    /// Returns [`KeygenError::Environment`] if the OS entropy source fails.
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; SEED_LEN];
        getrandom::fill(&mut bytes)
            .map_err(|e| KeygenError::environment(format!("secure random source failed: {e}")))?;
        Ok(Self(bytes))
    }

    /// Borrow the seed bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Encode the seed as URL-safe Base64 without padding
    #[must_use]
    pub fn to_base64url(&self) -> String {
        codec::encode(&self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(***)")
    }
}
