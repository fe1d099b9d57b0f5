#![cfg_attr(not(feature = "std"), no_std)]

//! # Kestrel
//!
//! Portable AES block cipher core and GHASH field engine.
//! Bit-exact against FIPS-197 and SP 800-38D, no target-specific code.

//! # Usage
//! ```rust
//! use kestrel::{expand_key, Ghash};
//!
//! // 1. Single-block AES
//! let schedule = expand_key(&[0u8; 16])?;
//! let ct = schedule.encrypt_block(&[0u8; 16]);
//! assert_eq!(schedule.decrypt_block(&ct), [0u8; 16]);
//!
//! // 2. One-shot GHASH with H = E_K(0^128)
//! let h = schedule.ghash_subkey();
//! let tag = kestrel::ghash(&h, b"header");
//!
//! // 3. Streaming GHASH
//! let mut hasher = Ghash::new(&h);
//! hasher.update(b"hea");
//! hasher.update(b"der");
//! assert!(hasher.verify(&tag));
//! # Ok::<(), kestrel::InvalidKeyLength>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod aes;
mod ghash;
// Re-export internal kernels for benchmarking/testing, hidden from docs
#[doc(hidden)]
pub mod kernels;
mod oneshot;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use aes::{decrypt_block, encrypt_block, expand_key, AesKeySchedule, KeySize};
pub use ghash::{
    ghash_multiply, ghash_multiply_reduce, ghash_reduce, ghash_update, reflect, unreflect,
    FieldElement, FixedOperand, SubkeyPowers, Unroll,
};
pub use kernels::constants::{BLOCK_SIZE, FIELD_POLY};
pub use oneshot::{ghash, ghash_subkey, verify_ghash};
pub use streaming::Ghash;
pub use types::{Block128, InvalidKeyLength};
