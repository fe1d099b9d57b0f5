//! Portable AES round functions.
//!
//! The state is column-major: byte `4 * c + r` holds row `r` of column `c`,
//! which is also the order the bytes appear in the 16-byte block. Each round
//! function matches the semantics of the corresponding x86 instruction
//! (`AESENC`, `AESENCLAST`, `AESDEC`, `AESDECLAST`), so the equivalent inverse
//! cipher can be expressed the same way hardware does it.

use self::utils::gf_double;
use crate::kernels::constants::{BLOCK_SIZE, INV_SBOX, INV_SHIFT_ROWS, SBOX, SHIFT_ROWS, WORD_SIZE};
use crate::types::Block128;

pub mod utils;

/// One AES round key as four big-endian schedule words (one per column).
pub type RoundKey = [u32; 4];

// =============================================================================
// COLUMN MIXING
// =============================================================================

/// AES `MixColumns` on a single 4-byte column.
fn mix_column(c: &mut [u8]) {
    let t = [c[0], c[1], c[2], c[3]];
    c[0] = gf_double(t[0] ^ t[1]) ^ t[1] ^ t[2] ^ t[3];
    c[1] = gf_double(t[1] ^ t[2]) ^ t[2] ^ t[3] ^ t[0];
    c[2] = gf_double(t[2] ^ t[3]) ^ t[3] ^ t[0] ^ t[1];
    c[3] = gf_double(t[3] ^ t[0]) ^ t[0] ^ t[1] ^ t[2];
}

/// AES `InvMixColumns` on a single 4-byte column.
///
/// Multiplying by `{04}x^2 + {05}` first turns the inverse matrix into the
/// forward one, so the forward `mix_column` finishes the job.
fn inv_mix_column(c: &mut [u8]) {
    let u = gf_double(gf_double(c[0] ^ c[2]));
    let v = gf_double(gf_double(c[1] ^ c[3]));
    c[0] ^= u;
    c[1] ^= v;
    c[2] ^= u;
    c[3] ^= v;
    mix_column(c);
}

/// `InvMixColumns` over the whole state.
pub fn inv_mix_columns(state: &mut Block128) {
    for column in state.chunks_exact_mut(WORD_SIZE) {
        inv_mix_column(column);
    }
}

/// `InvMixColumns` applied to one schedule word (used for decryption keys).
pub fn inv_mix_word(word: u32) -> u32 {
    let mut column = word.to_be_bytes();
    inv_mix_column(&mut column);
    u32::from_be_bytes(column)
}

// =============================================================================
// BYTE SUBSTITUTION
// =============================================================================

/// `SubWord` from the key expansion.
pub fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(|b| SBOX[b as usize]))
}

/// `SubBytes` + `ShiftRows` (they commute, so one pass does both).
fn sub_shift(state: &Block128) -> Block128 {
    let mut out = [0u8; BLOCK_SIZE];
    for (o, &src) in out.iter_mut().zip(SHIFT_ROWS.iter()) {
        *o = SBOX[state[src] as usize];
    }
    out
}

/// `InvSubBytes` + `InvShiftRows`.
pub fn inv_sub_shift(state: &Block128) -> Block128 {
    let mut out = [0u8; BLOCK_SIZE];
    for (o, &src) in out.iter_mut().zip(INV_SHIFT_ROWS.iter()) {
        *o = INV_SBOX[state[src] as usize];
    }
    out
}

// =============================================================================
// ROUNDS
// =============================================================================

/// `AddRoundKey`: XOR the four big-endian words into the state columns.
pub fn add_round_key(state: &mut Block128, key: &RoundKey) {
    for (column, word) in state.chunks_exact_mut(WORD_SIZE).zip(key) {
        for (b, k) in column.iter_mut().zip(word.to_be_bytes()) {
            *b ^= k;
        }
    }
}

/// Full encryption round: `SubBytes`, `ShiftRows`, `MixColumns`, `AddRoundKey`.
pub fn aesenc(state: Block128, key: &RoundKey) -> Block128 {
    let mut s = sub_shift(&state);
    for column in s.chunks_exact_mut(WORD_SIZE) {
        mix_column(column);
    }
    add_round_key(&mut s, key);
    s
}

/// Final encryption round (no `MixColumns`).
pub fn aesenclast(state: Block128, key: &RoundKey) -> Block128 {
    let mut s = sub_shift(&state);
    add_round_key(&mut s, key);
    s
}

/// Equivalent-inverse decryption round: `InvShiftRows`, `InvSubBytes`,
/// `InvMixColumns`, `AddRoundKey`. The key must already carry `InvMixColumns`.
pub fn aesdec(state: Block128, key: &RoundKey) -> Block128 {
    let mut s = inv_sub_shift(&state);
    inv_mix_columns(&mut s);
    add_round_key(&mut s, key);
    s
}

/// Final decryption round (no `InvMixColumns`).
pub fn aesdeclast(state: Block128, key: &RoundKey) -> Block128 {
    let mut s = inv_sub_shift(&state);
    add_round_key(&mut s, key);
    s
}
