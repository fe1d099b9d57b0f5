#![cfg_attr(not(feature = "std"), no_std)]

//! # Kestrel Sip
//!
//! SipHash-2-4 and HalfSipHash-2-4 keyed hashes for flooding-resistant hash
//! tables and short MACs. Round counts are const generics, so stronger
//! variants such as SipHash-4-8 need no code changes.

//! # Usage
//! ```rust
//! use kestrel_sip::{halfsiphash32, siphash64, SipHasher24};
//!
//! let seed = [0x2au8; 16];
//!
//! // 1. One-shot, 64- or 128-bit
//! let tag: [u8; 8] = siphash64(&seed, b"message");
//! let wide: [u8; 16] = siphash64(&seed, b"message");
//!
//! // 2. Streaming
//! let mut hasher = SipHasher24::new(&seed);
//! hasher.update(b"mess");
//! hasher.update(b"age");
//! assert_eq!(hasher.finalize(), tag);
//!
//! // 3. HalfSipHash with a 64-bit seed
//! let h = halfsiphash32(0x0123_4567_89ab_cdef, b"message");
//! # let _ = (wide, h);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod constants;
mod half;
mod hasher;
mod seed;
mod sip;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use half::{
    halfsiphash32, halfsiphash32_u16, halfsiphash32_u16_with_rounds, halfsiphash32_with_rounds,
    halfsiphash64, halfsiphash64_with_rounds,
};
pub use hasher::{SipBuildHasher, SipHasher, SipHasher128, SipHasher24};
#[cfg(feature = "std")]
pub use seed::compute_seed;
pub use seed::{compute_seed_from, SeedMaterial};
pub use sip::{siphash64, siphash64_with_rounds, siphash_u64, siphash_u64_with_rounds, SipOutput};

use subtle::ConstantTimeEq;

/// Verify a SipHash-2-4 64-bit tag in constant time.
///
/// # Example
/// ```rust
/// let seed = [9u8; 16];
/// let tag: [u8; 8] = kestrel_sip::siphash64(&seed, b"payload");
/// assert!(kestrel_sip::verify_mac(&seed, b"payload", &tag));
/// assert!(!kestrel_sip::verify_mac(&seed, b"payload!", &tag));
/// ```
#[must_use]
pub fn verify_mac(seed: &[u8; constants::SEED_SIZE], data: &[u8], expected: &[u8; 8]) -> bool {
    let computed: [u8; 8] = siphash64(seed, data);
    computed.ct_eq(expected).into()
}
