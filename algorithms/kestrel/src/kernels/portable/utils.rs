//! Portable software implementation of the GF(2) and byte-order helpers.

use crate::kernels::constants::GF_POLY;

/// GF(2^8) multiplication by 2 (used in `MixColumns`).
///
/// Branchless: `b >> 7` extracts the MSB as 0 or 1; multiplying by `GF_POLY`
/// produces the conditional reduction polynomial without a data-dependent branch.
pub const fn gf_double(b: u8) -> u8 {
    (b << 1) ^ ((b >> 7) * GF_POLY)
}

/// Carryless multiplication of two 64-bit integers (widening to 128-bit).
///
/// Implemented branchless: a data-dependent branch on individual bits of `b`
/// could leak timing information. Instead, each bit of `b` is converted to an
/// all-ones/all-zeros mask via `wrapping_neg`, and XOR is always performed.
///
/// Returns `(lo, hi)` halves of the 127-bit product.
pub const fn clmul_u64(a: u64, b: u64) -> (u64, u64) {
    let mut res_lo = 0u64;
    let mut res_hi = 0u64;

    let mut i = 0u32;
    while i < 64 {
        // Branchless: mask is 0xFFFF... if bit i of b is set, 0 otherwise.
        let mask = ((b >> i) & 1).wrapping_neg();
        let msg_lo = a << i;
        let msg_hi = if i == 0 { 0 } else { a >> (64 - i) }; // i==0 guard: loop counter, not data
        res_lo ^= msg_lo & mask;
        res_hi ^= msg_hi & mask;
        i += 1;
    }
    (res_lo, res_hi)
}

/// Byte-reverse a 4-byte group into a big-endian schedule word.
///
/// Externally expanded keys arrive as 32-bit words stored little-endian; the
/// schedule keeps FIPS-197 word order, so every such word is reversed once on
/// load.
pub const fn rev32_word(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes([bytes[3], bytes[2], bytes[1], bytes[0]])
}
