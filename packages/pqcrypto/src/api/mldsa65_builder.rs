//! ML-DSA-65 key generation builder

use crate::derive::FallbackPolicy;
use crate::keygen::{Mldsa65Generator, Mldsa65Keys};
use crate::loader::AdapterLoader;
use crate::Result;
use panelkey_common::Mldsa65Settings;
use std::marker::PhantomData;

/// Builder for ML-DSA-65 key generation
#[derive(Debug, Clone)]
pub struct Mldsa65Builder<'l> {
    pub(crate) seed: Option<String>,
    pub(crate) policy: FallbackPolicy,
    pub(crate) loader: &'l AdapterLoader,
}

/// Builder with result handler
pub struct Mldsa65BuilderWithHandler<'l, F, T> {
    pub(crate) inner: Mldsa65Builder<'l>,
    pub(crate) result_handler: F,
    pub(crate) _phantom: PhantomData<T>,
}

impl Default for Mldsa65Builder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Mldsa65Builder<'static> {
    /// Create a builder over the process-wide loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed: None,
            policy: FallbackPolicy::default(),
            loader: AdapterLoader::global(),
        }
    }
}

impl<'l> Mldsa65Builder<'l> {
    /// Derive from this URL-safe Base64 seed instead of a random one
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set the seed-agnostic fallback policy
    #[must_use]
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Take the fallback policy from loaded settings
    #[must_use]
    pub fn with_settings(self, settings: &Mldsa65Settings) -> Self {
        self.with_policy(FallbackPolicy::from(settings))
    }

    /// Resolve implementations through `loader`
    #[must_use]
    pub fn with_loader<'a>(self, loader: &'a AdapterLoader) -> Mldsa65Builder<'a> {
        Mldsa65Builder {
            seed: self.seed,
            policy: self.policy,
            loader,
        }
    }

    /// Add `on_result` handler
    pub fn on_result<F, T>(self, handler: F) -> Mldsa65BuilderWithHandler<'l, F, T>
    where
        F: FnOnce(Result<Mldsa65Keys>) -> T + Send + 'static,
    {
        Mldsa65BuilderWithHandler {
            inner: self,
            result_handler: handler,
            _phantom: PhantomData,
        }
    }

    /// Generate the key pair
    ///
    /// # Errors
    ///
    /// See [`Mldsa65Generator::generate`].
    pub async fn generate(self) -> Result<Mldsa65Keys> {
        Mldsa65Generator::new(self.loader)
            .with_policy(self.policy)
            .generate(self.seed.as_deref())
            .await
    }
}

impl<F, T> Mldsa65BuilderWithHandler<'_, F, T>
where
    F: FnOnce(Result<Mldsa65Keys>) -> T + Send + 'static,
    T: Send + 'static,
{
    /// Generate the key pair and pass the outcome to the handler
    pub async fn generate(self) -> T {
        let result = self.inner.generate().await;
        (self.result_handler)(result)
    }
}
