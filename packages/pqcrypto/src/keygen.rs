//! ML-DSA-65 key generation entry point

use crate::codec;
use crate::derive::{CandidateChain, DeriveKeyPair, FallbackPolicy};
use crate::error::{KeygenError, Result};
use crate::extract::extract_public_key;
use crate::loader::AdapterLoader;
use crate::seed::Seed;
use panelkey_common::LoggingTransformer;
use serde::{Deserialize, Serialize};

/// Seed and verification key, both URL-safe Base64 without padding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mldsa65Keys {
    /// The seed the key pair was derived from
    pub seed: String,
    /// The ML-DSA-65 public verification key
    pub verify: String,
    /// Whether `verify` was derived from `seed`
    ///
    /// `false` only when a seed-agnostic fallback produced the key pair, in
    /// which case the seed cannot reproduce it. Not serialized.
    #[serde(skip, default = "seed_bound_default")]
    pub deterministic: bool,
}

fn seed_bound_default() -> bool {
    true
}

/// Fail fast when the process has no usable entropy source
///
/// # Errors
///
/// Returns [`KeygenError::Environment`] if the OS CSPRNG is unavailable.
pub fn ensure_environment() -> Result<()> {
    let mut byte = [0u8; 1];
    getrandom::fill(&mut byte)
        .map_err(|e| KeygenError::environment(format!("no secure random source: {e}")))
}

/// Key generator bound to one loader and fallback policy
#[derive(Debug, Clone, Copy)]
pub struct Mldsa65Generator<'l> {
    loader: &'l AdapterLoader,
    policy: FallbackPolicy,
}

impl Default for Mldsa65Generator<'static> {
    fn default() -> Self {
        Self::new(AdapterLoader::global())
    }
}

impl<'l> Mldsa65Generator<'l> {
    /// Generator over `loader` with [`FallbackPolicy::Allow`]
    #[must_use]
    pub fn new(loader: &'l AdapterLoader) -> Self {
        Self {
            loader,
            policy: FallbackPolicy::default(),
        }
    }

    /// Replace the fallback policy
    #[must_use]
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Derive an ML-DSA-65 key pair
    ///
    /// With `Some(seed)` the seed is decoded and must be exactly 32 bytes;
    /// with `None` a fresh seed is drawn from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Any failure of the environment check, seed validation, loading,
    /// derivation or extraction is returned unchanged.
    pub async fn generate(&self, seed: Option<&str>) -> Result<Mldsa65Keys> {
        ensure_environment()?;

        let (seed, encoded_seed) = match seed {
            Some(text) => (Seed::from_base64url(text)?, text.to_owned()),
            None => {
                let seed = Seed::random()?;
                let encoded = seed.to_base64url();
                (seed, encoded)
            }
        };

        let handle = self.loader.load().await?;
        let chain = CandidateChain::for_handle(&handle, self.policy);
        let derivation = chain.derive(&seed).await?;
        let public_key = extract_public_key(&derivation.raw)?;

        LoggingTransformer::log_keygen("ML-DSA-65", &public_key, derivation.deterministic);
        tracing::debug!("ML-DSA-65 key pair produced by `{}`", derivation.factory);

        Ok(Mldsa65Keys {
            seed: encoded_seed,
            verify: codec::encode(&public_key),
            deterministic: derivation.deterministic,
        })
    }
}

/// Derive an ML-DSA-65 key pair with the process-wide loader
///
/// # Errors
///
/// See [`Mldsa65Generator::generate`].
pub async fn generate_mldsa65(seed: Option<&str>) -> Result<Mldsa65Keys> {
    Mldsa65Generator::default().generate(seed).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_flag_stays_out_of_json() {
        let keys = Mldsa65Keys {
            seed: "c2VlZA".into(),
            verify: "dmVyaWZ5".into(),
            deterministic: false,
        };

        let json = serde_json::to_value(&keys).expect("serialize");
        assert_eq!(json, serde_json::json!({ "seed": "c2VlZA", "verify": "dmVyaWZ5" }));

        let parsed: Mldsa65Keys = serde_json::from_value(json).expect("deserialize");
        assert!(parsed.deterministic);
        assert_eq!(parsed.verify, keys.verify);
    }
}
