//! X25519 key builder

use crate::x25519::{self, X25519Keys};
use crate::Result;

/// Builder for X25519 key operations
#[derive(Debug, Clone, Default)]
pub struct X25519Builder {
    pub(crate) private_key: Option<String>,
}

impl X25519Builder {
    /// Create a new X25519 builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing URL-safe Base64 private key
    #[must_use]
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Derive the public key of the configured private key
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeygenError::InvalidKey`] if no private key was set or
    /// it is not 32 bytes of URL-safe Base64.
    pub fn public_key(&self) -> Result<String> {
        let private_key = self
            .private_key
            .as_deref()
            .ok_or_else(|| crate::KeygenError::invalid_key("private key not set"))?;
        x25519::public_key_from_private(private_key)
    }

    /// Complete key pair: derived from the configured private key, or fresh
    ///
    /// # Errors
    ///
    /// Propagates [`x25519::public_key_from_private`] and [`x25519::generate`]
    /// failures.
    pub fn keypair(self) -> Result<X25519Keys> {
        match self.private_key {
            Some(private_key) => {
                let public_key = x25519::public_key_from_private(&private_key)?;
                Ok(X25519Keys {
                    private_key,
                    public_key,
                })
            }
            None => x25519::generate(),
        }
    }
}
