//! Built-in ML-DSA-65 backends
//!
//! Each backend crate is published as a [`Module`] under its package name,
//! mirroring the export layout that crate uses itself. The loader finds them
//! through [`BuiltinModules`] exactly as it would find any other source.

#[cfg(feature = "libcrux")]
use crate::error::FactoryError;
use crate::error::ImportError;
use crate::loader::ModuleSource;
use crate::module::Module;
#[cfg(any(feature = "libcrux", feature = "pqclean"))]
use crate::module::{Factory, RawKeyPair};
use futures::future::{self, BoxFuture};

/// Package name of the libcrux backend
pub const LIBCRUX_SPECIFIER: &str = "libcrux-ml-dsa";

/// Package name of the PQClean backend
pub const PQCLEAN_SPECIFIER: &str = "pqcrypto-mldsa";

/// ML-DSA-65 verification key length in bytes (FIPS 204)
pub const MLDSA65_PUBLIC_KEY_LEN: usize = 1952;

/// ML-DSA-65 signing key length in bytes (FIPS 204)
pub const MLDSA65_SECRET_KEY_LEN: usize = 4032;

/// Module source backed by the backends compiled into this crate
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinModules;

impl BuiltinModules {
    /// Package names available in this build
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        let mut names = Vec::new();
        #[cfg(feature = "libcrux")]
        names.push(LIBCRUX_SPECIFIER);
        #[cfg(feature = "pqclean")]
        names.push(PQCLEAN_SPECIFIER);
        names
    }

    fn resolve(specifier: &str) -> Option<Module> {
        match specifier {
            #[cfg(feature = "libcrux")]
            LIBCRUX_SPECIFIER => Some(libcrux_module()),
            #[cfg(feature = "pqclean")]
            PQCLEAN_SPECIFIER => Some(pqclean_module()),
            _ => None,
        }
    }
}

impl ModuleSource for BuiltinModules {
    fn import<'a>(
        &'a self,
        specifier: &'a str,
    ) -> BoxFuture<'a, Result<Option<Module>, ImportError>> {
        let result = Self::resolve(specifier)
            .map(Some)
            .ok_or_else(|| ImportError::new(specifier, "module not compiled into this build"));
        Box::pin(future::ready(result))
    }
}

/// `libcrux-ml-dsa`: `ml_dsa65.keygen(seed)` and `ml_dsa65.generate_key_pair(seed)`
#[cfg(feature = "libcrux")]
fn libcrux_module() -> Module {
    let keygen = Factory::seeded(|seed| {
        let pair = libcrux_ml_dsa::ml_dsa_65::generate_key_pair(*seed.as_bytes());
        Ok(RawKeyPair::object([
            (
                "publicKey",
                RawKeyPair::Bytes(pair.verification_key.as_slice().to_vec()),
            ),
            (
                "secretKey",
                RawKeyPair::Bytes(pair.signing_key.as_slice().to_vec()),
            ),
        ]))
    });

    let generate_key_pair = Factory::seeded(|seed| {
        let pair = libcrux_ml_dsa::ml_dsa_65::generate_key_pair(*seed.as_bytes());
        let verification_key = pair.verification_key.as_slice().to_vec();
        if verification_key.len() != MLDSA65_PUBLIC_KEY_LEN {
            return Err(FactoryError::new(format!(
                "unexpected verification key length {}",
                verification_key.len()
            )));
        }
        Ok(RawKeyPair::object([
            ("verification_key", RawKeyPair::Bytes(verification_key)),
            (
                "signing_key",
                RawKeyPair::Bytes(pair.signing_key.as_slice().to_vec()),
            ),
        ]))
    });

    Module::new(LIBCRUX_SPECIFIER).with_module(
        "ml_dsa65",
        Module::new("libcrux-ml-dsa/ml_dsa65")
            .with_factory("keygen", keygen)
            .with_factory("generate_key_pair", generate_key_pair),
    )
}

/// `pqcrypto-mldsa`: `mldsa65.keypair()` returning `(pk, sk)`
#[cfg(feature = "pqclean")]
fn pqclean_module() -> Module {
    use pqcrypto_traits::sign::{PublicKey as PqPublicKey, SecretKey as PqSecretKey};

    let keypair = Factory::unseeded(|| {
        let (pk, sk) = pqcrypto_mldsa::mldsa65::keypair();
        Ok(RawKeyPair::List(vec![
            RawKeyPair::Bytes(PqPublicKey::as_bytes(&pk).to_vec()),
            RawKeyPair::Bytes(PqSecretKey::as_bytes(&sk).to_vec()),
        ]))
    });

    Module::new(PQCLEAN_SPECIFIER).with_module(
        "mldsa65",
        Module::new("pqcrypto-mldsa/mldsa65").with_factory("keypair", keypair),
    )
}
