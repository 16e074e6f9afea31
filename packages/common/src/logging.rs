//! Structured logging infrastructure
//!
//! Provides env_logger-based logging. Library crates emit through `tracing`
//! with its `log` feature, so everything ends up in the same backend.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup shared by every panelkey binary
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=panelkey_pqcrypto=trace` - Show every loader attempt
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; repeated initialization is ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a finished key generation without exposing key material
    pub fn log_keygen(algorithm: &str, public_key: &[u8], deterministic: bool) {
        if deterministic {
            info!(
                "Generated {algorithm} key pair (public_key: {})",
                fingerprint(public_key)
            );
        } else {
            warn!(
                "Generated {algorithm} key pair without seed binding (public_key: {})",
                fingerprint(public_key)
            );
        }
    }
}

/// Short SHA-256 fingerprint of public material for log lines.
///
/// Returns `#` followed by the first 12 hex characters of the digest.
#[must_use]
pub fn fingerprint(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    let hex_hash = format!("{hash:x}");
    format!("#{}", &hex_hash[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        LoggingTransformer::init_test();

        let first = fingerprint(b"public key bytes");
        let second = fingerprint(b"public key bytes");
        let other = fingerprint(b"other key bytes");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(first.len(), 13);
        assert!(first.starts_with('#'));
    }
}
