//! Streaming GHASH
//!
//! Incremental GHASH over arbitrarily split input. Whole blocks go straight
//! to the unrolled lane loop; a partial trailing block waits in a 16-byte
//! buffer until more data arrives or the section is closed with zero padding.

use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::ghash::{absorb, reflect_padded, unreflect, FieldElement, SubkeyPowers, Unroll};
use crate::kernels::constants::BLOCK_SIZE;
use crate::types::Block128;

// =============================================================================
// STREAMING HASHER
// =============================================================================

/// Streaming GHASH accumulator for one subkey.
///
/// Splitting the input differently never changes the result, and neither
/// does the unroll factor.
#[derive(Clone)]
pub struct Ghash {
    /// Subkey and its cached powers
    powers: SubkeyPowers,
    /// Lane count used for whole-block runs
    unroll: Unroll,
    /// Running accumulator (reflected)
    state: FieldElement,
    /// Pending partial block
    buffer: Block128,
    /// Bytes used in `buffer` (always < `BLOCK_SIZE`)
    buffered: usize,
}

impl Ghash {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// New accumulator for subkey `H` (memory order), 4-way unrolled.
    #[must_use]
    pub fn new(subkey: &Block128) -> Self {
        Self::with_unroll(subkey, Unroll::default())
    }

    /// New accumulator with an explicit unroll factor.
    #[must_use]
    pub fn with_unroll(subkey: &Block128, unroll: Unroll) -> Self {
        Self {
            powers: SubkeyPowers::new(subkey),
            unroll,
            state: FieldElement::ZERO,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
        }
    }

    /// New accumulator over existing subkey powers.
    ///
    /// Every power `unroll` needs is computed here, so clones of the
    /// returned hasher never recompute them.
    #[must_use]
    pub fn with_powers(powers: SubkeyPowers, unroll: Unroll) -> Self {
        let _ = powers.powers(unroll);
        Self {
            powers,
            unroll,
            state: FieldElement::ZERO,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
        }
    }

    /// The subkey and its power cache.
    #[must_use]
    pub const fn subkey_powers(&self) -> &SubkeyPowers {
        &self.powers
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Absorb bytes. A trailing partial block is held back.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }
            self.flush();
        }

        let whole = data.len() - data.len() % BLOCK_SIZE;
        if whole > 0 {
            self.absorb_blocks(&data[..whole]);
        }

        let rest = &data[whole..];
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Absorb bytes and close the section: a trailing partial block is
    /// zero-padded to 16 bytes, as GCM does for AAD and ciphertext.
    pub fn update_padded(&mut self, data: &[u8]) {
        self.update(data);
        if self.buffered > 0 {
            self.flush();
        }
    }

    /// Current accumulator value (memory order), without closing any
    /// pending partial block.
    #[must_use]
    pub const fn state(&self) -> Block128 {
        unreflect(self.state)
    }

    /// Zero-pad any pending bytes and return the accumulator.
    #[must_use]
    pub fn finalize(mut self) -> Block128 {
        if self.buffered > 0 {
            self.flush();
        }
        unreflect(self.state)
    }

    /// Finalize and compare with `expected` in constant time.
    #[must_use]
    pub fn verify(self, expected: &Block128) -> bool {
        let computed = self.finalize();
        computed.ct_eq(expected).into()
    }

    /// Clear the accumulator and any pending bytes. Cached subkey powers are
    /// kept.
    pub fn reset(&mut self) {
        self.state = FieldElement::ZERO;
        self.buffer.zeroize();
        self.buffered = 0;
    }

    /// Absorb the pending buffer as one (zero-padded) block.
    fn flush(&mut self) {
        let pending = reflect_padded(&self.buffer[..self.buffered]);
        self.state = absorb(
            self.state,
            &self.powers.powers(Unroll::One),
            Unroll::One,
            core::iter::once(pending),
        );
        self.buffer.zeroize();
        self.buffered = 0;
    }

    /// `data.len()` must be a multiple of `BLOCK_SIZE`.
    fn absorb_blocks(&mut self, data: &[u8]) {
        let table = self.powers.powers(self.unroll);
        self.state = absorb(
            self.state,
            &table,
            self.unroll,
            data.chunks_exact(BLOCK_SIZE).map(reflect_padded),
        );
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl fmt::Debug for Ghash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ghash")
            .field("unroll", &self.unroll)
            .field("buffered", &self.buffered)
            .finish_non_exhaustive()
    }
}

impl Drop for Ghash {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}
