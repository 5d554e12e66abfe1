//! Re-exports [`fastvec`]'s containers.
//!
//! Parsed paths are short, so collecting them into a [`FastVec`] keeps the
//! common case off the heap until the final boxed slice is built.

pub use fastvec::{FastVec, fast_vec};
