//! AES Block Cipher Core
//!
//! FIPS-197 key expansion and single-block encryption / decryption for
//! AES-128, AES-192 and AES-256. Chaining, counters and padding belong to the
//! caller: every operation here consumes and produces exactly one block.

use core::fmt;
use zeroize::Zeroize;

use crate::kernels::constants::{BLOCK_SIZE, MAX_SCHEDULE_WORDS, RCON, WORD_SIZE};
use crate::kernels::portable::utils::rev32_word;
use crate::kernels::portable::{
    add_round_key, aesdec, aesdeclast, aesenc, aesenclast, inv_mix_word, sub_word, RoundKey,
};
use crate::types::{Block128, InvalidKeyLength};

// =============================================================================
// KEY SIZES
// =============================================================================

/// AES variant, selected solely by the length of the raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key, 10 rounds
    Aes128,
    /// 24-byte key, 12 rounds
    Aes192,
    /// 32-byte key, 14 rounds
    Aes256,
}

impl KeySize {
    /// Variant for a raw key of `len` bytes.
    #[must_use]
    pub const fn from_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Variant for an expanded schedule of `words` 32-bit words (44/52/60).
    #[must_use]
    pub const fn from_schedule_words(words: usize) -> Option<Self> {
        match words {
            44 => Some(Self::Aes128),
            52 => Some(Self::Aes192),
            60 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Raw key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Number of rounds.
    #[must_use]
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Words in the expanded schedule: one 4-word round key per round, plus the
    /// initial whitening key.
    #[must_use]
    pub const fn schedule_words(self) -> usize {
        4 * (self.rounds() + 1)
    }

    const fn key_words(self) -> usize {
        self.key_len() / WORD_SIZE
    }
}

// =============================================================================
// KEY SCHEDULE
// =============================================================================

/// Expanded round keys for one AES key.
///
/// Holds the FIPS-197 word schedule (big-endian words) used for encryption and
/// the equivalent-inverse schedule used for decryption. Immutable once built;
/// the words are zeroized on drop.
#[derive(Clone)]
pub struct AesKeySchedule {
    enc: [u32; MAX_SCHEDULE_WORDS],
    dec: [u32; MAX_SCHEDULE_WORDS],
    size: KeySize,
}

impl AesKeySchedule {
    /// Expand a raw 16, 24 or 32 byte key.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` for any other key length.
    pub fn new(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        let size =
            KeySize::from_key_len(key.len()).ok_or_else(|| InvalidKeyLength::new(key.len()))?;
        let nk = size.key_words();

        let mut enc = [0u32; MAX_SCHEDULE_WORDS];
        for (w, chunk) in enc.iter_mut().zip(key.chunks_exact(WORD_SIZE)) {
            *w = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        for i in nk..size.schedule_words() {
            let mut temp = enc[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
            } else if nk > 6 && i % nk == 4 {
                temp = sub_word(temp);
            }
            enc[i] = enc[i - nk] ^ temp;
        }

        log::debug!("expanded {size:?} key schedule ({} rounds)", size.rounds());
        Ok(Self::from_encryption_words(enc, size))
    }

    /// Load an already-expanded schedule whose 32-bit words are stored
    /// little-endian (44, 52 or 60 words).
    ///
    /// Each word is byte-reversed (`rev32`) into schedule order before use.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if the buffer is not exactly 176, 208 or
    /// 240 bytes.
    pub fn from_le_words(expanded: &[u8]) -> Result<Self, InvalidKeyLength> {
        let size = if expanded.len().is_multiple_of(WORD_SIZE) {
            KeySize::from_schedule_words(expanded.len() / WORD_SIZE)
        } else {
            None
        }
        .ok_or_else(|| InvalidKeyLength::new(expanded.len()))?;

        let mut enc = [0u32; MAX_SCHEDULE_WORDS];
        for (w, chunk) in enc.iter_mut().zip(expanded.chunks_exact(WORD_SIZE)) {
            *w = rev32_word([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        log::debug!("loaded pre-expanded {size:?} key schedule");
        Ok(Self::from_encryption_words(enc, size))
    }

    /// Derive the equivalent-inverse decryption schedule: round keys in reverse
    /// order, with `InvMixColumns` applied to every key except the first and last.
    fn from_encryption_words(enc: [u32; MAX_SCHEDULE_WORDS], size: KeySize) -> Self {
        let rounds = size.rounds();
        let mut dec = [0u32; MAX_SCHEDULE_WORDS];

        for round in 0..=rounds {
            let src = 4 * (rounds - round);
            let dst = 4 * round;
            for col in 0..4 {
                let word = enc[src + col];
                dec[dst + col] = if round == 0 || round == rounds {
                    word
                } else {
                    inv_mix_word(word)
                };
            }
        }

        Self { enc, dec, size }
    }

    /// AES variant of this schedule.
    #[must_use]
    pub const fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of rounds (10, 12 or 14).
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// The encryption schedule as big-endian 32-bit words.
    #[must_use]
    pub fn round_keys(&self) -> &[u32] {
        &self.enc[..self.size.schedule_words()]
    }

    /// Encrypt one 16-byte block.
    #[must_use]
    pub fn encrypt_block(&self, block: &Block128) -> Block128 {
        let rounds = self.rounds();
        let mut state = *block;

        add_round_key(&mut state, &round_key(&self.enc, 0));
        for round in 1..rounds {
            state = aesenc(state, &round_key(&self.enc, round));
        }
        aesenclast(state, &round_key(&self.enc, rounds))
    }

    /// Decrypt one 16-byte block.
    #[must_use]
    pub fn decrypt_block(&self, block: &Block128) -> Block128 {
        let rounds = self.rounds();
        let mut state = *block;

        add_round_key(&mut state, &round_key(&self.dec, 0));
        for round in 1..rounds {
            state = aesdec(state, &round_key(&self.dec, round));
        }
        aesdeclast(state, &round_key(&self.dec, rounds))
    }

    /// GHASH subkey `H = E_K(0^128)` for this key.
    #[must_use]
    pub fn ghash_subkey(&self) -> Block128 {
        self.encrypt_block(&[0u8; BLOCK_SIZE])
    }
}

/// Round key `round` of a word schedule.
const fn round_key(words: &[u32; MAX_SCHEDULE_WORDS], round: usize) -> RoundKey {
    let base = 4 * round;
    [words[base], words[base + 1], words[base + 2], words[base + 3]]
}

impl fmt::Debug for AesKeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesKeySchedule")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Drop for AesKeySchedule {
    fn drop(&mut self) {
        self.enc.zeroize();
        self.dec.zeroize();
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Expand a raw AES key into its round-key schedule.
///
/// # Errors
/// Returns `InvalidKeyLength` unless the key is 16, 24 or 32 bytes.
///
/// # Example
/// ```rust
/// let schedule = kestrel::expand_key(&[0u8; 16])?;
/// assert_eq!(schedule.rounds(), 10);
/// # Ok::<(), kestrel::InvalidKeyLength>(())
/// ```
pub fn expand_key(key: &[u8]) -> Result<AesKeySchedule, InvalidKeyLength> {
    AesKeySchedule::new(key)
}

/// Encrypt one block under an expanded key.
#[must_use]
#[inline]
pub fn encrypt_block(schedule: &AesKeySchedule, block: &Block128) -> Block128 {
    schedule.encrypt_block(block)
}

/// Decrypt one block under an expanded key.
#[must_use]
#[inline]
pub fn decrypt_block(schedule: &AesKeySchedule, block: &Block128) -> Block128 {
    schedule.decrypt_block(block)
}
