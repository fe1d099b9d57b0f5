//! GHASH Field Arithmetic
//!
//! Elements of GF(2^128) modulo `x^128 + x^7 + x^2 + x + 1`, held in the
//! reflected order GCM implies: after [`reflect`], bit `i` of `hi:lo` is the
//! coefficient of `x^i`. In that order field multiplication is plain
//! carry-less multiplication followed by a reduction, so no per-bit shifting
//! is needed.

use core::ops::{BitXor, BitXorAssign};
use zeroize::Zeroize;

use crate::kernels::constants::{BLOCK_SIZE, FIELD_POLY, MAX_UNROLL};
use crate::kernels::portable::utils::clmul_u64;
use crate::types::Block128;

pub mod powers;

pub use powers::{SubkeyPowers, Unroll};

// =============================================================================
// FIELD ELEMENTS
// =============================================================================

/// A 128-bit polynomial over GF(2) in reflected order.
///
/// Bit `i` of `lo` is the coefficient of `x^i`; bit `i` of `hi` is the
/// coefficient of `x^(64 + i)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldElement {
    /// Coefficients of `x^0 .. x^63`
    pub lo: u64,
    /// Coefficients of `x^64 .. x^127`
    pub hi: u64,
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self::new(0, 0);

    /// The multiplicative identity (`x^0`).
    pub const ONE: Self = Self::new(1, 0);

    /// Build an element from its two 64-bit halves.
    #[must_use]
    pub const fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// True for the zero polynomial.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn from_u128(v: u128) -> Self {
        Self::new(v as u64, (v >> 64) as u64)
    }

    #[allow(clippy::cast_lossless)]
    const fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }
}

impl BitXor for FieldElement {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::new(self.lo ^ rhs.lo, self.hi ^ rhs.hi)
    }
}

impl BitXorAssign for FieldElement {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.lo ^= rhs.lo;
        self.hi ^= rhs.hi;
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.lo.zeroize();
        self.hi.zeroize();
    }
}

// =============================================================================
// BIT REFLECTION
// =============================================================================

/// Read a block from memory into reflected field order.
///
/// GCM numbers bit 0 as the most significant bit of byte 0; this moves it to
/// bit 0 of `lo`.
#[must_use]
pub const fn reflect(block: &Block128) -> FieldElement {
    FieldElement::from_u128(u128::from_be_bytes(*block).reverse_bits())
}

/// Inverse of [`reflect`]: write a field element back out as a block.
#[must_use]
pub const fn unreflect(x: FieldElement) -> Block128 {
    x.to_u128().reverse_bits().to_be_bytes()
}

/// Reflect up to one block of bytes, zero-padding a short chunk on the right.
pub fn reflect_padded(chunk: &[u8]) -> FieldElement {
    let mut block = [0u8; BLOCK_SIZE];
    block[..chunk.len()].copy_from_slice(chunk);
    reflect(&block)
}

// =============================================================================
// MULTIPLY / REDUCE
// =============================================================================

/// A multiplication operand that is reused many times (the subkey or one of
/// its powers), carrying its precomputed Karatsuba fold `hi ^ lo`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedOperand {
    value: FieldElement,
    fold: u64,
}

impl FixedOperand {
    /// Precompute the fold for `value`.
    #[must_use]
    pub const fn new(value: FieldElement) -> Self {
        Self {
            value,
            fold: value.hi ^ value.lo,
        }
    }

    /// The underlying field element.
    #[must_use]
    pub const fn value(&self) -> FieldElement {
        self.value
    }
}

/// Karatsuba 128x128 carry-less multiply.
///
/// Returns the unreduced 256-bit product as `(lo, hi)`, where `lo` holds the
/// coefficients of `x^0 .. x^127` and `hi` those of `x^128 .. x^255`.
#[must_use]
pub const fn ghash_multiply(a: &FixedOperand, b: FieldElement) -> (FieldElement, FieldElement) {
    let d0 = clmul_u64(a.value.lo, b.lo);
    let d1 = clmul_u64(a.value.hi, b.hi);
    let e = clmul_u64(a.fold, b.lo ^ b.hi);

    // Middle term: E + D0 + D1
    let mid_lo = e.0 ^ d0.0 ^ d1.0;
    let mid_hi = e.1 ^ d0.1 ^ d1.1;

    (
        FieldElement::new(d0.0, d0.1 ^ mid_lo),
        FieldElement::new(d1.0 ^ mid_hi, d1.1),
    )
}

/// Fold a 256-bit product back into the field.
///
/// `field_poly` is the low part of the modulus (`x^128 = field_poly`), 0x87
/// for GHASH. Two 64-bit carry-less multiplies: the top word's overflow is
/// folded into the next word down first, so the second multiply cannot
/// overflow past bit 127.
#[must_use]
pub const fn ghash_reduce(lo: FieldElement, hi: FieldElement, field_poly: u64) -> FieldElement {
    let t = clmul_u64(hi.hi, field_poly);
    let hi_lo = hi.lo ^ t.1;
    let u = clmul_u64(hi_lo, field_poly);

    FieldElement::new(lo.lo ^ u.0, lo.hi ^ t.0 ^ u.1)
}

/// Field multiplication: [`ghash_multiply`] followed by [`ghash_reduce`].
#[must_use]
#[inline]
pub const fn ghash_multiply_reduce(a: &FixedOperand, b: FieldElement) -> FieldElement {
    let (lo, hi) = ghash_multiply(a, b);
    ghash_reduce(lo, hi, FIELD_POLY)
}

// =============================================================================
// MULTI-BLOCK UPDATE
// =============================================================================

/// Absorb `blocks` into the running GHASH accumulator.
///
/// `state` and every block are in memory order; the result is too. Each
/// block is bit-reflected on the way in and the accumulator on the way out.
/// With `U` lanes, whole groups of `U` blocks run in parallel accumulators;
/// the result equals sequential single-block GHASH for every unroll factor.
#[must_use]
pub fn ghash_update(
    state: &Block128,
    powers: &SubkeyPowers,
    blocks: &[Block128],
    unroll: Unroll,
) -> Block128 {
    let table = powers.powers(unroll);
    let x = absorb(reflect(state), &table, unroll, blocks.iter().map(reflect));
    unreflect(x)
}

/// Core lane loop over already-reflected blocks.
///
/// Lane `i` of every group but the last advances by `H^U`; in the last whole
/// group lane `i` advances by `H^(U - i)`, which lines every block up with
/// the power sequential processing would have given it. Leftover blocks
/// (count mod `U`) are single steps by `H`.
pub fn absorb<I>(
    state: FieldElement,
    powers: &[FieldElement; MAX_UNROLL],
    unroll: Unroll,
    mut blocks: I,
) -> FieldElement
where
    I: ExactSizeIterator<Item = FieldElement>,
{
    let lanes = unroll.lanes();
    let groups = blocks.len() / lanes;

    let h = FixedOperand::new(powers[0]);
    let mut x = state;

    if groups > 0 {
        // tail[i] = H^(U - i); tail[0] is also the per-group stride H^U.
        let mut tail = [FixedOperand::default(); MAX_UNROLL];
        for (i, op) in tail.iter_mut().take(lanes).enumerate() {
            *op = FixedOperand::new(powers[lanes - 1 - i]);
        }
        let stride = tail[0];

        let mut acc = [FieldElement::ZERO; MAX_UNROLL];
        acc[0] = x;

        for group in 0..groups {
            let last = group + 1 == groups;
            for ((lane, block), op) in acc
                .iter_mut()
                .zip(blocks.by_ref().take(lanes))
                .zip(tail.iter())
            {
                let power = if last { op } else { &stride };
                *lane = ghash_multiply_reduce(power, *lane ^ block);
            }
        }

        x = acc
            .iter()
            .take(lanes)
            .fold(FieldElement::ZERO, |sum, lane| sum ^ *lane);
    }

    for block in blocks {
        x = ghash_multiply_reduce(&h, x ^ block);
    }

    x
}
