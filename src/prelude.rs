//! Prelude module for the cnid_guess crate.
//!
//! Re-exports the derive_more macros used across the value types.

pub use derive_more::{Deref, Display};
