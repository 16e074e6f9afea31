//! Master builder for all panelkey operations

use panelkey_common::PanelKeyConfig;
use panelkey_pqcrypto::{Mldsa65Builder, X25519Builder};

/// Master builder providing the unified entry point
pub struct PanelKey;

impl PanelKey {
    /// Entry point for ML-DSA-65 key generation
    /// Example: `PanelKey::mldsa65().with_seed(seed).generate().await`
    #[must_use]
    pub fn mldsa65() -> Mldsa65Builder<'static> {
        Mldsa65Builder::new()
    }

    /// ML-DSA-65 key generation using the policy from `config`
    #[must_use]
    pub fn mldsa65_with_config(config: &PanelKeyConfig) -> Mldsa65Builder<'static> {
        Mldsa65Builder::new().with_settings(&config.mldsa65)
    }

    /// Entry point for X25519 key operations
    /// Example: `PanelKey::x25519().with_private_key(key).public_key()`
    #[must_use]
    pub fn x25519() -> X25519Builder {
        X25519Builder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkey_pqcrypto::FallbackPolicy;

    #[test]
    fn test_config_policy_reaches_builder() {
        let mut config = PanelKeyConfig::default();
        config.mldsa65.allow_unseeded_fallback = false;

        let expected = Mldsa65Builder::new().with_policy(FallbackPolicy::Deny);
        let built = PanelKey::mldsa65_with_config(&config);
        assert_eq!(format!("{built:?}"), format!("{expected:?}"));
    }
}
