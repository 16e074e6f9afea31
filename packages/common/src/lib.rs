//! Common infrastructure for the panelkey workspace
//!
//! This crate provides the shared ambient pieces used by the other crates:
//! - Logging initialization and redacted fingerprints for key material
//! - TOML configuration loading with OS-specific default locations

pub mod config;
pub mod logging;

pub use config::{ConfigError, Mldsa65Settings, PanelKeyConfig, CONFIG_ENV_VAR};
pub use logging::{fingerprint, LoggingTransformer};
