//! Subkey Powers Cache
//!
//! `H^2 .. H^4` are computed on first use with a given unroll factor and
//! shared afterwards. Each power is published as two atomic words: the low
//! word is stored first, then the high word with `Release`. Readers load the
//! high word with `Acquire`; a zero high word means "not computed yet".
//!
//! A power whose high word is genuinely zero is therefore recomputed on every
//! call. The result is still correct, since recomputation is idempotent.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use zeroize::Zeroize;

use super::{ghash_multiply_reduce, reflect, FieldElement, FixedOperand};
use crate::kernels::constants::MAX_UNROLL;
use crate::types::Block128;

// =============================================================================
// UNROLL FACTOR
// =============================================================================

/// Number of independent GHASH lanes processed per loop iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Unroll {
    /// Sequential single-block processing.
    One,
    /// Two lanes, stride `H^2`.
    Two,
    /// Three lanes, stride `H^3`.
    Three,
    /// Four lanes, stride `H^4`.
    #[default]
    Four,
}

impl Unroll {
    /// Lane count `U`.
    #[must_use]
    pub const fn lanes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Unroll factor for `lanes` lanes (1..=4).
    #[must_use]
    pub const fn from_lanes(lanes: usize) -> Option<Self> {
        match lanes {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }
}

// =============================================================================
// SUBKEY POWERS
// =============================================================================

/// The GHASH subkey `H` and its lazily cached powers.
///
/// Safe to share between threads; concurrent first uses may both compute a
/// power, and both store the same value.
pub struct SubkeyPowers {
    subkey: FieldElement,
    /// `cache[k]` holds `H^(k + 2)` as `[lo, hi]`.
    cache: [[AtomicU64; 2]; MAX_UNROLL - 1],
}

impl SubkeyPowers {
    /// Wrap a subkey given in memory (GCM) order, e.g. `E_K(0^128)`.
    #[must_use]
    pub fn new(subkey: &Block128) -> Self {
        Self::from_element(reflect(subkey))
    }

    /// Wrap a subkey that is already a reflected field element.
    #[must_use]
    pub fn from_element(subkey: FieldElement) -> Self {
        Self {
            subkey,
            cache: Default::default(),
        }
    }

    /// The subkey `H` as a field element.
    #[must_use]
    pub const fn subkey(&self) -> FieldElement {
        self.subkey
    }

    /// True if every power `unroll` needs is already published.
    #[must_use]
    pub fn is_cached(&self, unroll: Unroll) -> bool {
        self.cache
            .iter()
            .take(unroll.lanes() - 1)
            .all(|slot| slot[1].load(Ordering::Acquire) != 0)
    }

    /// `[H, H^2, .., H^U]`, zero-filled past `U`.
    ///
    /// Missing powers are computed from the previous one and published.
    #[must_use]
    pub fn powers(&self, unroll: Unroll) -> [FieldElement; MAX_UNROLL] {
        let mut out = [FieldElement::ZERO; MAX_UNROLL];
        out[0] = self.subkey;

        let h = FixedOperand::new(self.subkey);
        for k in 1..unroll.lanes() {
            let slot = &self.cache[k - 1];
            let prev = out[k - 1];
            out[k] = load(slot).unwrap_or_else(|| {
                let p = ghash_multiply_reduce(&h, prev);
                log::trace!("computed GHASH subkey power H^{}", k + 1);
                publish(slot, p);
                p
            });
        }
        out
    }
}

fn load(slot: &[AtomicU64; 2]) -> Option<FieldElement> {
    let hi = slot[1].load(Ordering::Acquire);
    if hi == 0 {
        return None;
    }
    Some(FieldElement::new(slot[0].load(Ordering::Relaxed), hi))
}

fn publish(slot: &[AtomicU64; 2], value: FieldElement) {
    slot[0].store(value.lo, Ordering::Relaxed);
    slot[1].store(value.hi, Ordering::Release);
}

impl Clone for SubkeyPowers {
    fn clone(&self) -> Self {
        let copy = Self::from_element(self.subkey);
        for (dst, src) in copy.cache.iter().zip(&self.cache) {
            if let Some(p) = load(src) {
                publish(dst, p);
            }
        }
        copy
    }
}

impl fmt::Debug for SubkeyPowers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubkeyPowers")
            .field("cached", &self.is_cached(Unroll::Four))
            .finish_non_exhaustive()
    }
}

impl Drop for SubkeyPowers {
    fn drop(&mut self) {
        self.subkey.zeroize();
        for slot in &mut self.cache {
            for word in slot {
                word.get_mut().zeroize();
            }
        }
    }
}
