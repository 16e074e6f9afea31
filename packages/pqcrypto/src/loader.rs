//! Adapter loader
//!
//! Resolves an ML-DSA-65 implementation handle without committing to one
//! export layout. An ordered list of [`LoaderStep`]s is tried against a
//! [`ModuleSource`]; the first step that yields a non-empty module wins.
//!
//! The outcome of the first attempt, success or failure, is stored in a
//! compute-once cell and returned to every later caller for the lifetime of
//! the loader. A failed attempt is never retried.

use crate::backends::{BuiltinModules, LIBCRUX_SPECIFIER, PQCLEAN_SPECIFIER};
use crate::error::{ImportError, KeygenError, Result};
use crate::module::Module;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Export that names the ML-DSA-65 variant inside a multi-variant module
pub const VARIANT_EXPORT: &str = "ml_dsa65";

/// Name used for a module's default export
pub const DEFAULT_EXPORT: &str = "default";

/// Where implementation modules come from
///
/// `Ok(None)` means the import succeeded but produced nothing usable.
pub trait ModuleSource: Send + Sync {
    /// Import the module published under `specifier`
    fn import<'a>(
        &'a self,
        specifier: &'a str,
    ) -> BoxFuture<'a, std::result::Result<Option<Module>, ImportError>>;
}

/// How to reach the implementation inside an imported module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAccess {
    /// A named sub-module export
    Named(&'static str),
    /// The `default` export
    Default,
    /// The imported module itself
    AsIs,
    /// A path of nested sub-module exports
    Nested(&'static [&'static str]),
}

/// One import-and-access pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderStep {
    /// Package to import
    pub specifier: &'static str,
    /// Access pattern applied to the imported module
    pub access: ExportAccess,
}

impl LoaderStep {
    /// Import `specifier` and take its `export` sub-module
    #[must_use]
    pub const fn named(specifier: &'static str, export: &'static str) -> Self {
        Self {
            specifier,
            access: ExportAccess::Named(export),
        }
    }

    /// Import `specifier` and take its default export
    #[must_use]
    pub const fn default_export(specifier: &'static str) -> Self {
        Self {
            specifier,
            access: ExportAccess::Default,
        }
    }

    /// Import `specifier` and use it directly
    #[must_use]
    pub const fn as_is(specifier: &'static str) -> Self {
        Self {
            specifier,
            access: ExportAccess::AsIs,
        }
    }

    /// Import `specifier` and follow `path` through nested exports
    #[must_use]
    pub const fn nested(specifier: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            specifier,
            access: ExportAccess::Nested(path),
        }
    }

    fn select(&self, module: Module) -> Option<Module> {
        let selected = match self.access {
            ExportAccess::AsIs => Some(module),
            ExportAccess::Default => module.submodule(DEFAULT_EXPORT).cloned(),
            ExportAccess::Named(export) => module.submodule(export).cloned(),
            ExportAccess::Nested(path) => {
                let mut current = Some(&module);
                for segment in path {
                    current = current.and_then(|m| m.submodule(segment));
                }
                current.cloned()
            }
        };
        selected.filter(|m| !m.is_empty())
    }
}

impl fmt::Display for LoaderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.access {
            ExportAccess::Named(export) => write!(f, "{}#{export}", self.specifier),
            ExportAccess::Default => write!(f, "{}#{DEFAULT_EXPORT}", self.specifier),
            ExportAccess::AsIs => write!(f, "{}", self.specifier),
            ExportAccess::Nested(path) => write!(f, "{}#{}", self.specifier, path.join(".")),
        }
    }
}

/// Known packaging variants of the built-in backends, most preferred first
pub const DEFAULT_LOADER_STEPS: &[LoaderStep] = &[
    LoaderStep::named(LIBCRUX_SPECIFIER, VARIANT_EXPORT),
    LoaderStep::default_export(LIBCRUX_SPECIFIER),
    LoaderStep::as_is(LIBCRUX_SPECIFIER),
    LoaderStep::nested(PQCLEAN_SPECIFIER, &["mldsa65"]),
    LoaderStep::as_is(PQCLEAN_SPECIFIER),
];

/// Handle to a resolved implementation
pub type ImplementationHandle = Arc<Module>;

static GLOBAL_LOADER: Lazy<AdapterLoader> = Lazy::new(AdapterLoader::builtin);

/// Lazily resolves and caches an implementation handle
pub struct AdapterLoader {
    source: Arc<dyn ModuleSource>,
    steps: Vec<LoaderStep>,
    cell: OnceCell<Result<ImplementationHandle>>,
}

impl AdapterLoader {
    /// Loader over `source` with an explicit step list
    pub fn new(source: Arc<dyn ModuleSource>, steps: Vec<LoaderStep>) -> Self {
        Self {
            source,
            steps,
            cell: OnceCell::new(),
        }
    }

    /// Loader over the built-in backends with [`DEFAULT_LOADER_STEPS`]
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinModules), DEFAULT_LOADER_STEPS.to_vec())
    }

    /// Process-wide loader over the built-in backends
    ///
    /// Its cached outcome lives as long as the process.
    pub fn global() -> &'static AdapterLoader {
        &GLOBAL_LOADER
    }

    /// Steps this loader tries, in order
    #[must_use]
    pub fn steps(&self) -> &[LoaderStep] {
        &self.steps
    }

    /// Whether an attempt has already completed
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cell.initialized()
    }

    /// Resolve the implementation handle
    ///
    /// The first call performs the attempt; concurrent callers wait on that
    /// same attempt and later callers receive its stored outcome.
    ///
    /// # Errors
    ///
    /// Returns [`KeygenError::ImplementationNotFound`] if no step yielded a
    /// usable module, now or on the first attempt.
    pub async fn load(&self) -> Result<ImplementationHandle> {
        self.cell.get_or_init(|| self.attempt()).await.clone()
    }

    async fn attempt(&self) -> Result<ImplementationHandle> {
        for step in &self.steps {
            let imported = match self.source.import(step.specifier).await {
                Ok(Some(module)) => module,
                Ok(None) => {
                    tracing::trace!("Loader step {step} produced nothing");
                    continue;
                }
                Err(err) => {
                    tracing::trace!("Loader step {step} failed: {err}");
                    continue;
                }
            };

            let Some(module) = step.select(imported) else {
                tracing::trace!("Loader step {step} has no usable export");
                continue;
            };

            let variant = module
                .submodule(VARIANT_EXPORT)
                .filter(|variant| !variant.is_empty())
                .cloned();
            let handle = variant.unwrap_or(module);
            tracing::debug!("Resolved ML-DSA-65 implementation via {step} ({})", handle.name());
            return Ok(Arc::new(handle));
        }

        Err(KeygenError::ImplementationNotFound(format!(
            "tried {} loader variant(s)",
            self.steps.len()
        )))
    }
}

impl fmt::Debug for AdapterLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterLoader")
            .field("steps", &self.steps)
            .field("settled", &self.is_settled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{Factory, RawKeyPair};
    use futures::future;

    fn dummy_factory() -> Factory {
        Factory::unseeded(|| Ok(RawKeyPair::Null))
    }

    #[test]
    fn test_step_selection_patterns() {
        let inner = Module::new("inner").with_factory("keygen", dummy_factory());
        let module = Module::new("pkg")
            .with_module("default", inner.clone())
            .with_module("a", Module::new("a").with_module("b", inner.clone()));

        let default = LoaderStep::default_export("pkg").select(module.clone());
        assert_eq!(default.map(|m| m.name().to_string()), Some("inner".into()));

        let nested = LoaderStep::nested("pkg", &["a", "b"]).select(module.clone());
        assert_eq!(nested.map(|m| m.name().to_string()), Some("inner".into()));

        assert!(LoaderStep::named("pkg", "missing").select(module.clone()).is_none());
        assert!(LoaderStep::as_is("pkg").select(module).is_some());
    }

    #[test]
    fn test_empty_module_is_not_selected() {
        assert!(LoaderStep::as_is("pkg").select(Module::new("pkg")).is_none());
    }

    #[test]
    fn test_step_display() {
        assert_eq!(
            LoaderStep::named(LIBCRUX_SPECIFIER, VARIANT_EXPORT).to_string(),
            "libcrux-ml-dsa#ml_dsa65"
        );
        assert_eq!(
            LoaderStep::nested(PQCLEAN_SPECIFIER, &["mldsa65"]).to_string(),
            "pqcrypto-mldsa#mldsa65"
        );
    }

    struct Fixed(Module);

    impl ModuleSource for Fixed {
        fn import<'a>(
            &'a self,
            _specifier: &'a str,
        ) -> BoxFuture<'a, std::result::Result<Option<Module>, ImportError>> {
            Box::pin(future::ready(Ok(Some(self.0.clone()))))
        }
    }

    #[tokio::test]
    async fn test_variant_export_is_preferred() {
        let module = Module::new("pkg")
            .with_factory("keygen", dummy_factory())
            .with_module(
                VARIANT_EXPORT,
                Module::new("pkg/variant").with_factory("keygen", dummy_factory()),
            );
        let loader = AdapterLoader::new(Arc::new(Fixed(module)), vec![LoaderStep::as_is("pkg")]);

        let handle = loader.load().await.expect("load");
        assert_eq!(handle.name(), "pkg/variant");
        assert!(loader.is_settled());
    }

    struct Falsy;

    impl ModuleSource for Falsy {
        fn import<'a>(
            &'a self,
            _specifier: &'a str,
        ) -> BoxFuture<'a, std::result::Result<Option<Module>, ImportError>> {
            Box::pin(future::ready(Ok(None)))
        }
    }

    #[tokio::test]
    async fn test_falsy_imports_exhaust_every_step() {
        let loader = AdapterLoader::new(
            Arc::new(Falsy),
            vec![LoaderStep::as_is("a"), LoaderStep::default_export("b")],
        );

        let err = loader.load().await.expect_err("nothing importable");
        assert_eq!(
            err,
            KeygenError::ImplementationNotFound("tried 2 loader variant(s)".into())
        );
        assert!(loader.is_settled());
    }

    #[tokio::test]
    async fn test_builtin_loader_resolves() {
        let loader = AdapterLoader::builtin();
        let result = loader.load().await;
        if BuiltinModules::available().is_empty() {
            assert!(matches!(result, Err(KeygenError::ImplementationNotFound(_))));
        } else {
            assert!(result.is_ok());
        }
    }
}
