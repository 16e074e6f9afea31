//! Deterministic ML-DSA-65 key derivation
//!
//! Turns a 32-byte seed into an ML-DSA-65 (FIPS 204, NIST security level 3)
//! verification key and returns both as URL-safe Base64 without padding.
//!
//! The ML-DSA-65 implementation is not hard-wired. An [`AdapterLoader`]
//! probes the available backends once per process, and a
//! [`CandidateChain`] probes the resolved handle for a key-generation
//! function, preferring seed-aware ones. Whatever shape the backend returns,
//! [`extract_public_key`] pulls the verification key out of it.
//!
//! # Backends
//!
//! - `libcrux` feature: `libcrux-ml-dsa`, seed-aware
//! - `pqclean` feature: `pqcrypto-mldsa`, seed-agnostic fallback
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> panelkey_pqcrypto::Result<()> {
//! let keys = panelkey_pqcrypto::generate_mldsa65(None).await?;
//! let again = panelkey_pqcrypto::generate_mldsa65(Some(keys.seed.as_str())).await?;
//! assert_eq!(keys, again);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backends;
pub mod codec;
pub mod derive;
mod error;
pub mod extract;
pub mod keygen;
pub mod loader;
pub mod module;
pub mod seed;
pub mod x25519;

// Re-export error types
pub use self::error::{CodecError, FactoryError, ImportError, KeygenError, Result};

// Re-export main types
pub use self::backends::BuiltinModules;
pub use self::derive::{CandidateChain, DeriveKeyPair, Derivation, FallbackPolicy};
pub use self::extract::extract_public_key;
pub use self::keygen::{generate_mldsa65, Mldsa65Generator, Mldsa65Keys};
pub use self::loader::{AdapterLoader, ImplementationHandle, LoaderStep, ModuleSource};
pub use self::module::{Export, Factory, Module, RawKeyPair};
pub use self::seed::{Seed, SEED_LEN};
pub use self::x25519::X25519Keys;

pub use self::api::{Mldsa65Builder, Mldsa65BuilderWithHandler, X25519Builder};

/// Prelude for key generation
pub mod prelude {
    pub use super::{
        generate_mldsa65, FallbackPolicy, KeygenError, Mldsa65Builder, Mldsa65Keys,
        X25519Builder, X25519Keys,
    };
}
