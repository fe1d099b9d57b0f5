//! Hash Seed Derivation
//!
//! Folds a handful of weak entropy sources into one 64-bit seed with
//! `halfsiphash64(0, ..)`. Meant to be called once per process to key hash
//! tables, not as a cryptographic random source.

use crate::half::halfsiphash64;

#[cfg(feature = "std")]
use rand::prelude::*;
#[cfg(feature = "std")]
use std::time::{SystemTime, UNIX_EPOCH};

/// Raw inputs to [`compute_seed_from`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedMaterial {
    /// Two address-derived identity values (ASLR makes these vary per run).
    pub identities: [u32; 2],
    /// One draw from a non-cryptographic RNG.
    pub random: u32,
    /// High-resolution clock reading in nanoseconds.
    pub nanos: u64,
    /// Wall-clock time in milliseconds.
    pub millis: u64,
    /// A second nanosecond reading, taken last.
    pub late_nanos: u64,
}

impl SeedMaterial {
    /// The eight words hashed into the seed, in order: identities, random
    /// draw, nanos (high, low), millis (high, low), `late_nanos >> 2`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn words(&self) -> [u32; 8] {
        [
            self.identities[0],
            self.identities[1],
            self.random,
            (self.nanos >> 32) as u32,
            self.nanos as u32,
            (self.millis >> 32) as u32,
            self.millis as u32,
            (self.late_nanos >> 2) as u32,
        ]
    }

    /// Collect material from the running process.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn gather() -> Self {
        static ANCHOR: u8 = 0;
        let local = 0u8;

        let now = since_epoch();
        let mut draw = [0u8; 4];
        rand::rng().fill(&mut draw[..]);

        let material = Self {
            identities: [
                fold_address(core::ptr::addr_of!(ANCHOR).addr()),
                fold_address(core::ptr::addr_of!(local).addr()),
            ],
            random: u32::from_le_bytes(draw),
            nanos: low_u64(now.as_nanos()),
            millis: low_u64(now.as_millis()),
            late_nanos: low_u64(since_epoch().as_nanos()),
        };
        log::trace!("gathered hash seed material");
        material
    }
}

#[cfg(feature = "std")]
fn since_epoch() -> std::time::Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

#[cfg(feature = "std")]
#[allow(clippy::cast_possible_truncation)]
const fn low_u64(v: u128) -> u64 {
    v as u64
}

#[cfg(feature = "std")]
#[allow(clippy::cast_possible_truncation)]
const fn fold_address(addr: usize) -> u32 {
    let a = addr as u64;
    (a ^ (a >> 32)) as u32
}

/// Deterministic core of seed derivation.
#[must_use]
pub fn compute_seed_from(material: &SeedMaterial) -> u64 {
    halfsiphash64(0, &material.words())
}

/// A fresh 64-bit hash seed from process-environment entropy.
#[cfg(feature = "std")]
#[must_use]
pub fn compute_seed() -> u64 {
    compute_seed_from(&SeedMaterial::gather())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_layout() {
        let m = SeedMaterial {
            identities: [1, 2],
            random: 3,
            nanos: 0x0000_0004_0000_0005,
            millis: 0x0000_0006_0000_0007,
            late_nanos: 8 << 2,
        };
        assert_eq!(m.words(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_seed_is_deterministic_in_material() {
        let m = SeedMaterial {
            random: 0xdead_beef,
            millis: 1_700_000_000_000,
            ..SeedMaterial::default()
        };
        assert_eq!(compute_seed_from(&m), compute_seed_from(&m));
        assert_eq!(compute_seed_from(&m), halfsiphash64(0, &m.words()));

        let other = SeedMaterial { random: 0xdead_beee, ..m };
        assert_ne!(compute_seed_from(&m), compute_seed_from(&other));
    }

    #[test]
    fn test_fold_address() {
        assert_eq!(fold_address(0), 0);
        assert_eq!(fold_address(0x1234), 0x1234);
    }

    #[test]
    fn test_compute_seed_varies() {
        // Random draw and clock make repeats vanishingly unlikely.
        let seeds: Vec<u64> = (0..4).map(|_| compute_seed()).collect();
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
    }
}
