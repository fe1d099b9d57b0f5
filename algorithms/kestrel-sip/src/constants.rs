//! `SipHash` Constants
//!
//! Initialization words, domain-separation bytes and default round counts.

// =============================================================================
// ROUND COUNTS
// =============================================================================

/// Compression rounds per message word ("2" in SipHash-2-4).
pub const C_ROUNDS: usize = 2;

/// Finalization rounds ("4" in SipHash-2-4).
pub const D_ROUNDS: usize = 4;

// =============================================================================
// SIZES
// =============================================================================

/// `SipHash` key size in bytes.
pub const SEED_SIZE: usize = 16;

/// `SipHash` message word size in bytes.
pub const WORD_SIZE: usize = 8;

/// `HalfSipHash` message word size in bytes.
pub const HALF_WORD_SIZE: usize = 4;

// =============================================================================
// INITIALIZATION
// =============================================================================

/// `SipHash` initial state: "somepseudorandomlygeneratedbytes".
pub const SIP_INIT: [u64; 4] = [
    0x736f_6d65_7073_6575,
    0x646f_7261_6e64_6f6d,
    0x6c79_6765_6e65_7261,
    0x7465_6462_7974_6573,
];

/// `HalfSipHash` initial words for `v2` and `v3`.
pub const HALF_INIT: [u32; 2] = [0x6c79_6765, 0x7465_6462];

// =============================================================================
// DOMAIN SEPARATION
// =============================================================================

/// Wide output: flipped into `v1` at init and into `v2` at finalization.
pub const WIDE_DOMAIN: u8 = 0xee;

/// Narrow output: flipped into `v2` at finalization.
pub const NARROW_DOMAIN: u8 = 0xff;

/// Flipped into `v1` before squeezing the second half of wide output.
pub const SECOND_HALF_DOMAIN: u8 = 0xdd;
