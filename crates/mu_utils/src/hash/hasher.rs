//! Provide `FixedHasher`.
//!
//! `FixedHasher` is based on the `foldhash` crate and
//! provides stable hash results through a fixed hash seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x4E45_5354_4544_5041);

/// A hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`].
///
/// Which can be created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a fixed seed, so hashing is reproducible across runs.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use mu_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("attr");
/// let b = FixedHashState.hash_one("attr");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FixedHashState;
    use core::hash::BuildHasher;

    #[test]
    fn distinct_keys_hash_differently() {
        let x = FixedHashState.hash_one("x");
        let y = FixedHashState.hash_one("y");
        assert_ne!(x, y);
        assert_eq!(x, FixedHashState.hash_one("x"));
    }
}
