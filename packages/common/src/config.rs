//! Configuration loading
//!
//! ```toml
//! [mldsa65]
//! allow_unseeded_fallback = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV_VAR: &str = "PANELKEY_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level panelkey configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelKeyConfig {
    /// ML-DSA-65 key derivation settings
    #[serde(default)]
    pub mldsa65: Mldsa65Settings,
}

/// ML-DSA-65 key derivation settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mldsa65Settings {
    /// Permit seed-agnostic factories when no seed-aware one works.
    ///
    /// Keys produced that way are not reproducible from the returned seed.
    #[serde(default = "default_allow_unseeded_fallback")]
    pub allow_unseeded_fallback: bool,
}

fn default_allow_unseeded_fallback() -> bool {
    true
}

impl Default for Mldsa65Settings {
    fn default() -> Self {
        Self {
            allow_unseeded_fallback: default_allow_unseeded_fallback(),
        }
    }
}

impl PanelKeyConfig {
    /// Load configuration.
    ///
    /// Resolution order: `explicit`, then `$PANELKEY_CONFIG`, then
    /// `<config_dir>/panelkey/config.toml`. Only the default location may be
    /// absent; defaults are used in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read, or if any
    /// file that exists fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read and parse a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// OS-specific default config location
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut dir| {
            dir.push("panelkey");
            dir.push("config.toml");
            dir
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: PanelKeyConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config, PanelKeyConfig::default());
        assert!(config.mldsa65.allow_unseeded_fallback);
    }

    #[test]
    fn test_from_file_reads_strict_policy() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[mldsa65]\nallow_unseeded_fallback = false").expect("write config");

        let config = PanelKeyConfig::from_file(file.path()).expect("config should load");
        assert!(!config.mldsa65.allow_unseeded_fallback);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");

        let err = PanelKeyConfig::load(Some(missing.as_path())).expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[mldsa65]\nallow_unseeded_fallback = \"sometimes\"").expect("write");

        let err = PanelKeyConfig::from_file(file.path()).expect_err("bad type must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
