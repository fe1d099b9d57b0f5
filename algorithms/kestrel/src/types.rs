//! Shared types used across the Kestrel library.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

use crate::kernels::constants::BLOCK_SIZE;

// =============================================================================
// BLOCKS
// =============================================================================

/// One 128-bit value: a cipher block, a GHASH field element in storage order,
/// or a GHASH accumulator.
///
/// The byte and bit order is a property of the operation, not of this type:
/// AES reads it as a column-major state, GHASH reads it through
/// [`reflect`](crate::reflect).
pub type Block128 = [u8; BLOCK_SIZE];

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error for AES key material of an unsupported length.
///
/// Raised before any output is produced. The caller must supply a key of
/// 16, 24 or 32 bytes (or an expanded schedule of 44, 52 or 60 words).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyLength {
    len: usize,
}

impl InvalidKeyLength {
    /// Create a new `InvalidKeyLength` for key material of `len` bytes.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    /// Length in bytes of the rejected key material.
    #[must_use]
    pub const fn key_len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for InvalidKeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid AES key length: {} bytes (expected 16, 24 or 32, \
             or an expanded schedule of 176, 208 or 240 bytes)",
            self.len
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for InvalidKeyLength {}
