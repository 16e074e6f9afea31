//! Error types for the key derivation crate

use panelkey_common::ConfigError;
use std::fmt;
use thiserror::Error;

/// Result type alias for key derivation operations
pub type Result<T> = std::result::Result<T, KeygenError>;

/// Main error type for every fatal key derivation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeygenError {
    /// The process cannot reach a usable entropy source
    #[error("Unsupported environment: {0}")]
    Environment(String),

    /// The supplied seed is not valid URL-safe Base64
    #[error("Invalid seed: {0}")]
    InvalidSeed(#[from] CodecError),

    /// The supplied seed decoded to the wrong number of bytes
    #[error("Invalid seed length: expected {expected} bytes, got {actual}")]
    InvalidSeedLength {
        /// Required seed length
        expected: usize,
        /// Decoded seed length
        actual: usize,
    },

    /// No loader variant produced an ML-DSA-65 implementation
    #[error("ML-DSA-65 implementation not found: {0}")]
    ImplementationNotFound(String),

    /// Every candidate factory failed or none was present
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// The key pair returned by the backend has an unrecognized shape
    #[error("Unable to extract public key: {0}")]
    PublicKeyExtraction(String),

    /// Invalid key material supplied by the caller
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for KeygenError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl KeygenError {
    /// Create an `Environment` error with a formatted message
    pub fn environment(msg: impl fmt::Display) -> Self {
        Self::Environment(msg.to_string())
    }

    /// Create a `KeyGenerationFailed` error with a formatted message
    pub fn key_generation(msg: impl fmt::Display) -> Self {
        Self::KeyGenerationFailed(msg.to_string())
    }

    /// Create an `InvalidKey` error with a formatted message
    pub fn invalid_key(msg: impl fmt::Display) -> Self {
        Self::InvalidKey(msg.to_string())
    }
}

/// Base64URL decoding failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The text is not valid Base64 after alphabet and padding restoration
    #[error("Base64URL decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded value has the wrong length
    #[error("Decoded length mismatch: expected {expected} bytes, got {actual}")]
    Length {
        /// Required length
        expected: usize,
        /// Decoded length
        actual: usize,
    },
}

/// Failure of a single module import attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to import `{specifier}`: {reason}")]
pub struct ImportError {
    /// Module specifier that was requested
    pub specifier: String,
    /// Why the import failed
    pub reason: String,
}

impl ImportError {
    /// Create an import error for `specifier`
    pub fn new(specifier: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            specifier: specifier.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failure of a single candidate factory call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FactoryError(pub String);

impl FactoryError {
    /// Create a factory error with a formatted message
    pub fn new(msg: impl fmt::Display) -> Self {
        Self(msg.to_string())
    }
}
