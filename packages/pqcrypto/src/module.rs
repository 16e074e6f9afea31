//! Implementation handles of unknown shape
//!
//! A backend is exposed as a [`Module`]: a table of named exports where each
//! export is either a callable [`Factory`] or another module. Nothing about
//! the exact names is assumed here; the loader and deriver probe for them.

use crate::error::FactoryError;
use crate::seed::Seed;
use futures::future::{self, BoxFuture};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use zeroize::Zeroize;

/// Future returned by a factory call
pub type FactoryFuture = BoxFuture<'static, Result<RawKeyPair, FactoryError>>;

type FactoryFn = dyn Fn(Option<Seed>) -> FactoryFuture + Send + Sync;

/// Key-pair factory exported by a backend
///
/// `arity` is the number of parameters the factory declares. A factory with
/// at least one parameter receives the seed; a zero-arity factory is called
/// without one.
#[derive(Clone)]
pub struct Factory {
    arity: usize,
    call: Arc<FactoryFn>,
}

impl Factory {
    /// Factory that takes the seed as its single argument
    pub fn seeded<F>(f: F) -> Self
    where
        F: Fn(&Seed) -> Result<RawKeyPair, FactoryError> + Send + Sync + 'static,
    {
        Self::with_arity(1, move |seed| {
            let result = match seed {
                Some(seed) => f(&seed),
                None => Err(FactoryError::new("seed argument missing")),
            };
            future::ready(result)
        })
    }

    /// Factory that takes no arguments
    pub fn unseeded<F>(f: F) -> Self
    where
        F: Fn() -> Result<RawKeyPair, FactoryError> + Send + Sync + 'static,
    {
        Self::with_arity(0, move |_| future::ready(f()))
    }

    /// Factory with an explicit arity and an asynchronous body
    pub fn with_arity<F, Fut>(arity: usize, f: F) -> Self
    where
        F: Fn(Option<Seed>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RawKeyPair, FactoryError>> + Send + 'static,
    {
        let call: Arc<FactoryFn> =
            Arc::new(move |seed: Option<Seed>| -> FactoryFuture { Box::pin(f(seed)) });
        Self { arity, call }
    }

    /// Declared parameter count
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Whether the factory accepts a seed
    #[must_use]
    pub fn takes_seed(&self) -> bool {
        self.arity > 0
    }

    /// Invoke the factory
    pub fn call(&self, seed: Option<Seed>) -> FactoryFuture {
        (self.call)(seed)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A single named export
#[derive(Clone, Debug)]
pub enum Export {
    /// Callable key-pair factory
    Factory(Factory),
    /// Nested module
    Module(Module),
}

/// Table of named exports
#[derive(Clone, Debug, Default)]
pub struct Module {
    name: String,
    exports: BTreeMap<String, Export>,
}

impl Module {
    /// Empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: BTreeMap::new(),
        }
    }

    /// Add a factory export
    #[must_use]
    pub fn with_factory(mut self, name: impl Into<String>, factory: Factory) -> Self {
        self.exports.insert(name.into(), Export::Factory(factory));
        self
    }

    /// Add a nested module export
    #[must_use]
    pub fn with_module(mut self, name: impl Into<String>, module: Module) -> Self {
        self.exports.insert(name.into(), Export::Module(module));
        self
    }

    /// Module name, for diagnostics
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an export
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    /// Look up an export that is a factory
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<&Factory> {
        match self.exports.get(name) {
            Some(Export::Factory(factory)) => Some(factory),
            _ => None,
        }
    }

    /// Look up an export that is a module
    #[must_use]
    pub fn submodule(&self, name: &str) -> Option<&Module> {
        match self.exports.get(name) {
            Some(Export::Module(module)) => Some(module),
            _ => None,
        }
    }

    /// Exported names
    pub fn export_names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }

    /// A module with no exports counts as a failed import
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// Key pair as returned by a backend, in whatever shape it chose
///
/// Byte buffers are wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq)]
pub enum RawKeyPair {
    /// Bare byte buffer
    Bytes(Vec<u8>),
    /// String-keyed record
    Object(BTreeMap<String, RawKeyPair>),
    /// Ordered collection
    List(Vec<RawKeyPair>),
    /// Text value
    Text(String),
    /// No value
    Null,
}

impl RawKeyPair {
    /// Build an `Object` from `(name, value)` pairs
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, RawKeyPair)>,
        K: Into<String>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Byte contents, if this is a buffer
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Field of an `Object`
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&RawKeyPair> {
        match self {
            Self::Object(fields) => fields.get(name),
            _ => None,
        }
    }

    /// `Null`, or an empty buffer/record/list
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Object(fields) => fields.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Text(_) => false,
        }
    }

    /// Short shape description for error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Text(_) => "text",
            Self::Null => "null",
        }
    }
}

impl Zeroize for RawKeyPair {
    fn zeroize(&mut self) {
        match self {
            Self::Bytes(bytes) => bytes.zeroize(),
            Self::Object(fields) => fields.values_mut().for_each(Zeroize::zeroize),
            Self::List(items) => items.iter_mut().for_each(Zeroize::zeroize),
            Self::Text(text) => text.zeroize(),
            Self::Null => {}
        }
    }
}

impl Drop for RawKeyPair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for RawKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "Bytes(<{} bytes>)", bytes.len()),
            Self::Object(fields) => f.debug_map().entries(fields.iter()).finish(),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Text(_) => f.write_str("Text(***)"),
            Self::Null => f.write_str("Null"),
        }
    }
}
