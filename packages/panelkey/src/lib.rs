//! # PanelKey - node key generation for proxy panels
//!
//! Unified entry point over the workspace crates:
//!
//! - ML-DSA-65 key pairs derived deterministically from a 32-byte seed
//! - X25519 key pairs for REALITY transport
//!
//! Keys are exchanged as URL-safe Base64 without padding.
//!
//! ## Example
//!
//! ```rust,no_run
//! use panelkey::PanelKey;
//!
//! async fn example() -> panelkey::Result<()> {
//!     let keys = PanelKey::mldsa65().generate().await?;
//!     println!("seed={} verify={}", keys.seed, keys.verify);
//!
//!     let reality = PanelKey::x25519().keypair()?;
//!     println!("public={}", reality.public_key);
//!     Ok(())
//! }
//! ```

pub mod cli;
mod master;

pub use master::PanelKey;

pub use panelkey_common::{LoggingTransformer, PanelKeyConfig};
pub use panelkey_pqcrypto::{
    FallbackPolicy, KeygenError, Mldsa65Builder, Mldsa65Keys, Result, X25519Builder, X25519Keys,
};
