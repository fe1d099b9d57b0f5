//! `SipHash`
//!
//! 64-bit ARX state, 8-byte message words, 64- or 128-bit output. Round
//! counts are const generics; the plain functions are SipHash-2-4.

use core::array;
use zeroize::Zeroize;

use crate::constants::{
    C_ROUNDS, D_ROUNDS, NARROW_DOMAIN, SECOND_HALF_DOMAIN, SEED_SIZE, SIP_INIT, WIDE_DOMAIN,
    WORD_SIZE,
};

// =============================================================================
// OUTPUT SIZE
// =============================================================================

mod sealed {
    pub trait Sealed {}
    impl Sealed for [u8; 8] {}
    impl Sealed for [u8; 16] {}
}

/// `SipHash` output: `[u8; 8]` or `[u8; 16]`.
///
/// The width is part of the hash: it is folded into the state at
/// initialization, so the two outputs are unrelated values.
pub trait SipOutput: sealed::Sealed + Copy + AsRef<[u8]> {
    /// True for the 128-bit output.
    const WIDE: bool;

    /// Serialize the squeezed words little-endian (`words[1]` is unused for
    /// the narrow output).
    #[doc(hidden)]
    fn from_words(words: [u64; 2]) -> Self;
}

impl SipOutput for [u8; 8] {
    const WIDE: bool = false;

    fn from_words(words: [u64; 2]) -> Self {
        words[0].to_le_bytes()
    }
}

impl SipOutput for [u8; 16] {
    const WIDE: bool = true;

    fn from_words(words: [u64; 2]) -> Self {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&words[0].to_le_bytes());
        out[8..].copy_from_slice(&words[1].to_le_bytes());
        out
    }
}

// =============================================================================
// STATE
// =============================================================================

/// `v0 .. v3` for one SipHash-C-D invocation.
#[derive(Clone)]
pub struct SipState<const C: usize, const D: usize> {
    v: [u64; 4],
}

impl<const C: usize, const D: usize> SipState<C, D> {
    pub fn new(seed: &[u8; SEED_SIZE], wide: bool) -> Self {
        let k0 = le_u64(&seed[..WORD_SIZE]);
        let k1 = le_u64(&seed[WORD_SIZE..]);

        let mut v = [
            SIP_INIT[0] ^ k0,
            SIP_INIT[1] ^ k1,
            SIP_INIT[2] ^ k0,
            SIP_INIT[3] ^ k1,
        ];
        if wide {
            v[1] ^= u64::from(WIDE_DOMAIN);
        }
        Self { v }
    }

    const fn round(&mut self) {
        let [mut v0, mut v1, mut v2, mut v3] = self.v;

        v0 = v0.wrapping_add(v1);
        v1 = v1.rotate_left(13) ^ v0;
        v0 = v0.rotate_left(32);
        v2 = v2.wrapping_add(v3);
        v3 = v3.rotate_left(16) ^ v2;
        v0 = v0.wrapping_add(v3);
        v3 = v3.rotate_left(21) ^ v0;
        v2 = v2.wrapping_add(v1);
        v1 = v1.rotate_left(17) ^ v2;
        v2 = v2.rotate_left(32);

        self.v = [v0, v1, v2, v3];
    }

    fn rounds(&mut self, n: usize) {
        for _ in 0..n {
            self.round();
        }
    }

    /// Absorb one message word with `C` rounds.
    pub fn compress(&mut self, m: u64) {
        self.v[3] ^= m;
        self.rounds(C);
        self.v[0] ^= m;
    }

    const fn squeeze(&self) -> u64 {
        self.v[0] ^ self.v[1] ^ self.v[2] ^ self.v[3]
    }

    /// Run `D` finalization rounds (twice for wide output).
    pub fn finish(mut self, wide: bool) -> [u64; 2] {
        if !wide {
            self.v[2] ^= u64::from(NARROW_DOMAIN);
            self.rounds(D);
            return [self.squeeze(), 0];
        }

        self.v[2] ^= u64::from(WIDE_DOMAIN);
        self.rounds(D);
        let first = self.squeeze();

        self.v[1] ^= u64::from(SECOND_HALF_DOMAIN);
        self.rounds(D);
        [first, self.squeeze()]
    }
}

impl<const C: usize, const D: usize> Drop for SipState<C, D> {
    fn drop(&mut self) {
        self.v.zeroize();
    }
}

/// Little-endian word from exactly 8 bytes.
pub fn le_u64(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(array::from_fn(|i| bytes[i]))
}

/// Top byte of the final word: message length mod 256.
pub const fn length_tag(len: usize) -> u64 {
    (len as u64) << 56
}

/// Final word: length tag over the 0..=7 leftover bytes, packed little-endian.
pub fn tail_word(tail: &[u8], total_len: usize) -> u64 {
    tail.iter()
        .enumerate()
        .fold(length_tag(total_len), |w, (i, &b)| w | (u64::from(b) << (8 * i)))
}

// =============================================================================
// ONE-SHOT API
// =============================================================================

/// SipHash-2-4 of `data` under a 16-byte seed.
///
/// The output type selects the width: `[u8; 8]` for 64-bit, `[u8; 16]` for
/// 128-bit.
///
/// # Example
/// ```rust
/// let seed = [7u8; 16];
/// let narrow: [u8; 8] = kestrel_sip::siphash64(&seed, b"key");
/// let wide: [u8; 16] = kestrel_sip::siphash64(&seed, b"key");
/// assert_ne!(narrow[..], wide[..8]);
/// ```
#[must_use]
#[inline]
pub fn siphash64<O: SipOutput>(seed: &[u8; SEED_SIZE], data: &[u8]) -> O {
    siphash64_with_rounds::<O, C_ROUNDS, D_ROUNDS>(seed, data)
}

/// SipHash-C-D with caller-chosen round counts.
#[must_use]
pub fn siphash64_with_rounds<O: SipOutput, const C: usize, const D: usize>(
    seed: &[u8; SEED_SIZE],
    data: &[u8],
) -> O {
    let mut state = SipState::<C, D>::new(seed, O::WIDE);

    let mut words = data.chunks_exact(WORD_SIZE);
    for word in &mut words {
        state.compress(le_u64(word));
    }
    state.compress(tail_word(words.remainder(), data.len()));

    O::from_words(state.finish(O::WIDE))
}

/// SipHash-2-4 with 64-bit output as an integer.
#[must_use]
#[inline]
pub fn siphash_u64(seed: &[u8; SEED_SIZE], data: &[u8]) -> u64 {
    siphash_u64_with_rounds::<C_ROUNDS, D_ROUNDS>(seed, data)
}

/// SipHash-C-D with 64-bit output as an integer.
#[must_use]
pub fn siphash_u64_with_rounds<const C: usize, const D: usize>(
    seed: &[u8; SEED_SIZE],
    data: &[u8],
) -> u64 {
    u64::from_le_bytes(siphash64_with_rounds::<[u8; 8], C, D>(seed, data))
}
