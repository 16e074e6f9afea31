//! API module for key generation builders

mod mldsa65_builder;
mod x25519_builder;

pub use self::mldsa65_builder::{Mldsa65Builder, Mldsa65BuilderWithHandler};
pub use self::x25519_builder::X25519Builder;
