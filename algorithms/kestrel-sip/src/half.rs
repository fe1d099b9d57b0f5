//! `HalfSipHash`
//!
//! 32-bit ARX state seeded from one `u64`. Used for cheap seeded hashing of
//! byte strings, 16-bit-unit strings and `u32` arrays.

use zeroize::Zeroize;

use crate::constants::{
    C_ROUNDS, D_ROUNDS, HALF_INIT, HALF_WORD_SIZE, NARROW_DOMAIN, SECOND_HALF_DOMAIN, WIDE_DOMAIN,
};

// =============================================================================
// STATE
// =============================================================================

struct HalfState<const C: usize, const D: usize> {
    v: [u32; 4],
}

impl<const C: usize, const D: usize> HalfState<C, D> {
    /// `v0`/`v1` take the low/high halves of the seed.
    #[allow(clippy::cast_possible_truncation)]
    fn new(seed: u64, wide: bool) -> Self {
        let k0 = seed as u32;
        let k1 = (seed >> 32) as u32;

        let mut v = [k0, k1, HALF_INIT[0] ^ k0, HALF_INIT[1] ^ k1];
        if wide {
            v[1] ^= u32::from(WIDE_DOMAIN);
        }
        Self { v }
    }

    const fn round(&mut self) {
        let [mut v0, mut v1, mut v2, mut v3] = self.v;

        v0 = v0.wrapping_add(v1);
        v1 = v1.rotate_left(5) ^ v0;
        v0 = v0.rotate_left(16);
        v2 = v2.wrapping_add(v3);
        v3 = v3.rotate_left(8) ^ v2;
        v0 = v0.wrapping_add(v3);
        v3 = v3.rotate_left(7) ^ v0;
        v2 = v2.wrapping_add(v1);
        v1 = v1.rotate_left(13) ^ v2;
        v2 = v2.rotate_left(16);

        self.v = [v0, v1, v2, v3];
    }

    fn rounds(&mut self, n: usize) {
        for _ in 0..n {
            self.round();
        }
    }

    fn compress(&mut self, m: u32) {
        self.v[3] ^= m;
        self.rounds(C);
        self.v[0] ^= m;
    }

    fn finish32(mut self) -> u32 {
        self.v[2] ^= u32::from(NARROW_DOMAIN);
        self.rounds(D);
        self.v[1] ^ self.v[3]
    }

    fn finish64(mut self) -> u64 {
        self.v[2] ^= u32::from(WIDE_DOMAIN);
        self.rounds(D);
        let lo = self.v[1] ^ self.v[3];

        self.v[1] ^= u32::from(SECOND_HALF_DOMAIN);
        self.rounds(D);
        let hi = self.v[1] ^ self.v[3];

        u64::from(lo) | (u64::from(hi) << 32)
    }
}

impl<const C: usize, const D: usize> Drop for HalfState<C, D> {
    fn drop(&mut self) {
        self.v.zeroize();
    }
}

/// Top byte of the final word: `units * unit_size` mod 256.
#[allow(clippy::cast_possible_truncation)]
const fn length_tag(units: usize, unit_size: u32) -> u32 {
    (units as u32).wrapping_mul(unit_size) << 24
}

// =============================================================================
// ONE-SHOT API
// =============================================================================

/// HalfSipHash-2-4 of a byte string, 32-bit output.
///
/// # Example
/// ```rust
/// let h = kestrel_sip::halfsiphash32(0x0706_0504_0302_0100, b"");
/// assert_eq!(h, 0x5b9f_35a9);
/// ```
#[must_use]
#[inline]
pub fn halfsiphash32(seed: u64, data: &[u8]) -> u32 {
    halfsiphash32_with_rounds::<C_ROUNDS, D_ROUNDS>(seed, data)
}

/// HalfSipHash-C-D of a byte string, 32-bit output.
#[must_use]
pub fn halfsiphash32_with_rounds<const C: usize, const D: usize>(seed: u64, data: &[u8]) -> u32 {
    let mut state = HalfState::<C, D>::new(seed, false);

    let mut words = data.chunks_exact(HALF_WORD_SIZE);
    for word in &mut words {
        state.compress(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
    }

    let tail = words
        .remainder()
        .iter()
        .enumerate()
        .fold(length_tag(data.len(), 1), |w, (i, &b)| {
            w | (u32::from(b) << (8 * i))
        });
    state.compress(tail);

    state.finish32()
}

/// HalfSipHash-2-4 of a 16-bit-unit string, 32-bit output.
///
/// Units are paired little-endian into words, so the result equals
/// [`halfsiphash32`] over the little-endian bytes of `data`.
#[must_use]
#[inline]
pub fn halfsiphash32_u16(seed: u64, data: &[u16]) -> u32 {
    halfsiphash32_u16_with_rounds::<C_ROUNDS, D_ROUNDS>(seed, data)
}

/// HalfSipHash-C-D of a 16-bit-unit string, 32-bit output.
#[must_use]
pub fn halfsiphash32_u16_with_rounds<const C: usize, const D: usize>(
    seed: u64,
    data: &[u16],
) -> u32 {
    let mut state = HalfState::<C, D>::new(seed, false);

    let mut pairs = data.chunks_exact(2);
    for pair in &mut pairs {
        state.compress(u32::from(pair[0]) | (u32::from(pair[1]) << 16));
    }

    let mut tail = length_tag(data.len(), 2);
    if let [unit] = pairs.remainder() {
        tail |= u32::from(*unit);
    }
    state.compress(tail);

    state.finish32()
}

/// HalfSipHash-2-4 of a `u32` array, 64-bit output.
#[must_use]
#[inline]
pub fn halfsiphash64(seed: u64, data: &[u32]) -> u64 {
    halfsiphash64_with_rounds::<C_ROUNDS, D_ROUNDS>(seed, data)
}

/// HalfSipHash-C-D of a `u32` array, 64-bit output.
#[must_use]
pub fn halfsiphash64_with_rounds<const C: usize, const D: usize>(seed: u64, data: &[u32]) -> u64 {
    let mut state = HalfState::<C, D>::new(seed, true);

    for &word in data {
        state.compress(word);
    }
    state.compress(length_tag(data.len(), 4));

    state.finish64()
}
