use ahash::RandomState;

// Seed words for the default family member. Any fixed values work; these
// keep every `SeededHasher::default()` hashing identically.
const DEFAULT_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// A family of 32-bit hash functions indexed by a small integer seed.
///
/// Implementations must be deterministic: the same instance given the same
/// `key` and `seed` always returns the same value. Outputs are expected to
/// be spread uniformly over the `u32` range, since sketch rows take them
/// modulo the row width.
#[cfg_attr(test, mockall::automock)]
pub trait HashFamily {
    fn hash(&self, key: &[u8], seed: u32) -> u32;
}

/// Default [`HashFamily`] backed by aHash with fixed seed words.
#[derive(Clone)]
pub struct SeededHasher {
    state: RandomState,
}

impl SeededHasher {
    /// Selects a different member of the family than the default.
    pub fn with_seeds(k0: u64, k1: u64, k2: u64, k3: u64) -> Self {
        Self {
            state: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }
}

impl Default for SeededHasher {
    fn default() -> Self {
        let [k0, k1, k2, k3] = DEFAULT_SEEDS;
        Self::with_seeds(k0, k1, k2, k3)
    }
}

impl HashFamily for SeededHasher {
    #[inline]
    fn hash(&self, key: &[u8], seed: u32) -> u32 {
        let h = self.state.hash_one((seed, key));
        (h ^ (h >> 32)) as u32
    }
}
