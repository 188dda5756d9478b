//! Collection type aliases used throughout the workspace.
//!
//! FxHash is a fast, non-cryptographic hasher; all keys here are
//! internal identifiers, never attacker-controlled input.

pub use rustc_hash::{FxHashMap, FxHashSet};
