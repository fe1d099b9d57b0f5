//! Streaming `SipHash`
//!
//! Incremental `SipHash` with at most 7 bytes buffered. Byte-identical to
//! [`siphash64`](crate::siphash64) however the input is split.

use core::fmt;
use core::hash::{BuildHasher, Hasher};
use core::marker::PhantomData;
use zeroize::Zeroize;

use crate::constants::{C_ROUNDS, D_ROUNDS, SEED_SIZE, WORD_SIZE};
use crate::sip::{le_u64, length_tag, SipOutput, SipState};

#[cfg(feature = "digest-trait")]
use crypto_common::{Key, KeySizeUser};
#[cfg(feature = "digest-trait")]
use digest::typenum::{U16, U8};
#[cfg(feature = "digest-trait")]
use digest::Output;
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, KeyInit, MacMarker, OutputSizeUser, Reset, Update};

// =============================================================================
// STREAMING HASHER
// =============================================================================

/// Streaming SipHash-C-D with output `O` (`[u8; 8]` or `[u8; 16]`).
#[derive(Clone)]
pub struct SipHasher<O = [u8; 8], const C: usize = C_ROUNDS, const D: usize = D_ROUNDS> {
    /// Seed kept for `reset`
    seed: [u8; SEED_SIZE],
    /// Compression state
    state: SipState<C, D>,
    /// Pending bytes, packed little-endian
    tail: u64,
    /// Bytes in `tail` (always < `WORD_SIZE`)
    ntail: usize,
    /// Total bytes absorbed
    length: usize,
    _output: PhantomData<O>,
}

/// SipHash-2-4, 64-bit output.
pub type SipHasher24 = SipHasher<[u8; 8], C_ROUNDS, D_ROUNDS>;

/// SipHash-2-4, 128-bit output.
pub type SipHasher128 = SipHasher<[u8; 16], C_ROUNDS, D_ROUNDS>;

impl<O: SipOutput, const C: usize, const D: usize> SipHasher<O, C, D> {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// New hasher keyed with a 16-byte seed.
    #[must_use]
    pub fn new(seed: &[u8; SEED_SIZE]) -> Self {
        Self {
            seed: *seed,
            state: SipState::new(seed, O::WIDE),
            tail: 0,
            ntail: 0,
            length: 0,
            _output: PhantomData,
        }
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Absorb bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len());
        let mut data = data;

        if self.ntail > 0 {
            let take = (WORD_SIZE - self.ntail).min(data.len());
            let (head, rest) = data.split_at(take);
            self.push_tail(head);
            data = rest;

            if self.ntail < WORD_SIZE {
                return;
            }
            self.state.compress(self.tail);
            self.tail = 0;
            self.ntail = 0;
        }

        let mut words = data.chunks_exact(WORD_SIZE);
        for word in &mut words {
            self.state.compress(le_u64(word));
        }
        self.push_tail(words.remainder());
    }

    fn push_tail(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.tail |= u64::from(b) << (8 * self.ntail);
            self.ntail += 1;
        }
    }

    /// Hash of everything absorbed so far. The hasher stays usable.
    #[must_use]
    pub fn finalize(&self) -> O {
        let mut state = self.state.clone();
        state.compress(self.tail | length_tag(self.length));
        O::from_words(state.finish(O::WIDE))
    }

    /// Restart from the seed.
    pub fn reset(&mut self) {
        self.state = SipState::new(&self.seed, O::WIDE);
        self.tail.zeroize();
        self.ntail = 0;
        self.length = 0;
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl<const C: usize, const D: usize> Hasher for SipHasher<[u8; 8], C, D> {
    fn finish(&self) -> u64 {
        u64::from_le_bytes(self.finalize())
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

impl<O, const C: usize, const D: usize> fmt::Debug for SipHasher<O, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipHasher")
            .field("c_rounds", &C)
            .field("d_rounds", &D)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl<O, const C: usize, const D: usize> Drop for SipHasher<O, C, D> {
    fn drop(&mut self) {
        self.seed.zeroize();
        self.tail.zeroize();
    }
}

#[cfg(feature = "digest-trait")]
macro_rules! impl_mac_traits {
    ($out:ty, $size:ty) => {
        impl<const C: usize, const D: usize> OutputSizeUser for SipHasher<$out, C, D> {
            type OutputSize = $size;
        }

        impl<const C: usize, const D: usize> KeySizeUser for SipHasher<$out, C, D> {
            type KeySize = U16;
        }

        impl<const C: usize, const D: usize> KeyInit for SipHasher<$out, C, D> {
            fn new(key: &Key<Self>) -> Self {
                let mut seed = [0u8; SEED_SIZE];
                seed.copy_from_slice(key.as_slice());
                let hasher = Self::new(&seed);
                seed.zeroize();
                hasher
            }
        }

        impl<const C: usize, const D: usize> Update for SipHasher<$out, C, D> {
            fn update(&mut self, data: &[u8]) {
                self.update(data);
            }
        }

        impl<const C: usize, const D: usize> FixedOutput for SipHasher<$out, C, D> {
            fn finalize_into(self, out: &mut Output<Self>) {
                out.copy_from_slice(&self.finalize());
            }
        }

        impl<const C: usize, const D: usize> Reset for SipHasher<$out, C, D> {
            fn reset(&mut self) {
                self.reset();
            }
        }

        impl<const C: usize, const D: usize> MacMarker for SipHasher<$out, C, D> {}
    };
}

#[cfg(feature = "digest-trait")]
impl_mac_traits!([u8; 8], U8);
#[cfg(feature = "digest-trait")]
impl_mac_traits!([u8; 16], U16);

// =============================================================================
// BUILD HASHER
// =============================================================================

/// Keyed `BuildHasher` for hash tables that must resist collision flooding.
#[derive(Clone)]
pub struct SipBuildHasher {
    seed: [u8; SEED_SIZE],
}

impl SipBuildHasher {
    /// Fixed seed; every hasher built from it is keyed the same way.
    #[must_use]
    pub const fn new(seed: [u8; SEED_SIZE]) -> Self {
        Self { seed }
    }

    /// Seed from process-environment entropy (see
    /// [`compute_seed`](crate::compute_seed)).
    #[cfg(feature = "std")]
    #[must_use]
    pub fn random() -> Self {
        let mut seed = [0u8; SEED_SIZE];
        seed[..WORD_SIZE].copy_from_slice(&crate::compute_seed().to_le_bytes());
        seed[WORD_SIZE..].copy_from_slice(&crate::compute_seed().to_le_bytes());
        log::debug!("seeded SipBuildHasher from environment entropy");
        Self { seed }
    }
}

impl BuildHasher for SipBuildHasher {
    type Hasher = SipHasher24;

    fn build_hasher(&self) -> SipHasher24 {
        SipHasher24::new(&self.seed)
    }
}

#[cfg(feature = "std")]
impl Default for SipBuildHasher {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Debug for SipBuildHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipBuildHasher").finish_non_exhaustive()
    }
}

impl Drop for SipBuildHasher {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}
