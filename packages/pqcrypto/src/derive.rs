//! Seed-to-keypair derivation over an implementation of unknown shape
//!
//! [`resolve_candidates`] probes a handle for factory exports in
//! [`FACTORY_PRIORITY`] order. [`CandidateChain`] wraps the result behind the
//! single-method [`DeriveKeyPair`] interface so callers never see the
//! probing.

use crate::error::{KeygenError, Result};
use crate::module::{Factory, Module, RawKeyPair};
use crate::seed::Seed;
use futures::future::BoxFuture;
use panelkey_common::Mldsa65Settings;

/// Factory export names, seed-aware spellings first
pub const FACTORY_PRIORITY: &[&str] = &[
    "keygen_from_seed",
    "keypair_from_seed",
    "from_seed",
    "derive_keypair",
    "keygen",
    "generate_key_pair",
    "generate_keypair",
    "keypair",
    "generate",
];

/// What to do when only seed-agnostic factories are left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Call them, and mark the result as not reproducible
    #[default]
    Allow,
    /// Skip them
    Deny,
}

impl From<&Mldsa65Settings> for FallbackPolicy {
    fn from(settings: &Mldsa65Settings) -> Self {
        if settings.allow_unseeded_fallback {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

/// A factory export found on a handle
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Export name
    pub name: &'static str,
    /// The factory itself
    pub factory: Factory,
}

/// Outcome of a successful derivation
#[derive(Debug, Clone)]
pub struct Derivation {
    /// Key pair in the backend's own shape
    pub raw: RawKeyPair,
    /// Export that produced it
    pub factory: &'static str,
    /// Whether the seed was passed to the factory
    pub deterministic: bool,
}

/// Derives a key pair from a seed
pub trait DeriveKeyPair: Send + Sync {
    /// Derive the key pair bound to `seed`
    fn derive<'a>(&'a self, seed: &'a Seed) -> BoxFuture<'a, Result<Derivation>>;
}

/// Factory exports present on `handle`, in priority order
#[must_use]
pub fn resolve_candidates(handle: &Module) -> Vec<Candidate> {
    FACTORY_PRIORITY
        .iter()
        .filter_map(|&name| {
            handle.factory(name).map(|factory| Candidate {
                name,
                factory: factory.clone(),
            })
        })
        .collect()
}

/// Tries candidates in order until one yields a non-empty key pair
#[derive(Debug, Clone)]
pub struct CandidateChain {
    candidates: Vec<Candidate>,
    policy: FallbackPolicy,
}

impl CandidateChain {
    /// Chain over the factories found on `handle`
    #[must_use]
    pub fn for_handle(handle: &Module, policy: FallbackPolicy) -> Self {
        Self::new(resolve_candidates(handle), policy)
    }

    /// Chain over an explicit candidate list
    #[must_use]
    pub fn new(candidates: Vec<Candidate>, policy: FallbackPolicy) -> Self {
        Self { candidates, policy }
    }

    /// Candidate names in call order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.candidates.iter().map(|c| c.name)
    }

    async fn run(&self, seed: &Seed) -> Result<Derivation> {
        for candidate in &self.candidates {
            let deterministic = candidate.factory.takes_seed();
            if !deterministic && self.policy == FallbackPolicy::Deny {
                tracing::debug!("Skipping seed-agnostic factory `{}`", candidate.name);
                continue;
            }

            let arg = deterministic.then(|| seed.clone());
            match candidate.factory.call(arg).await {
                Ok(raw) if raw.is_empty() => {
                    tracing::warn!("Factory `{}` returned an empty key pair", candidate.name);
                }
                Ok(raw) => {
                    if !deterministic {
                        tracing::warn!(
                            "Factory `{}` ignores the seed; key pair is not reproducible",
                            candidate.name
                        );
                    }
                    return Ok(Derivation {
                        raw,
                        factory: candidate.name,
                        deterministic,
                    });
                }
                Err(err) => {
                    tracing::warn!("Factory `{}` failed: {err}", candidate.name);
                }
            }
        }

        Err(KeygenError::key_generation("compatible function not found"))
    }
}

impl DeriveKeyPair for CandidateChain {
    fn derive<'a>(&'a self, seed: &'a Seed) -> BoxFuture<'a, Result<Derivation>> {
        Box::pin(self.run(seed))
    }
}
