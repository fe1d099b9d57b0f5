//! Public API Layer
//!
//! One-shot GHASH, constant-time tag checks and subkey derivation.

use crate::aes::AesKeySchedule;
use crate::streaming::Ghash;
use crate::types::{Block128, InvalidKeyLength};
use subtle::ConstantTimeEq;

// =============================================================================
// GHASH
// =============================================================================

/// GHASH of `data` under subkey `H`, zero-padding a trailing partial block.
///
/// # Example
/// ```rust
/// let h = [0x42u8; 16];
/// let tag = kestrel::ghash(&h, b"additional data");
/// assert!(kestrel::verify_ghash(&h, b"additional data", &tag));
/// ```
#[must_use]
pub fn ghash(subkey: &Block128, data: &[u8]) -> Block128 {
    let mut hasher = Ghash::new(subkey);
    hasher.update_padded(data);
    hasher.finalize()
}

/// Recompute GHASH and compare with `expected` in constant time.
#[must_use]
pub fn verify_ghash(subkey: &Block128, data: &[u8], expected: &Block128) -> bool {
    let computed = ghash(subkey, data);
    computed.ct_eq(expected).into()
}

/// GHASH subkey `H = E_K(0^128)` for a raw AES key.
///
/// # Errors
/// Returns `InvalidKeyLength` unless the key is 16, 24 or 32 bytes.
pub fn ghash_subkey(key: &[u8]) -> Result<Block128, InvalidKeyLength> {
    Ok(AesKeySchedule::new(key)?.ghash_subkey())
}
