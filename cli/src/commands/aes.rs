//! AES Command
//!
//! One block through the forward or inverse cipher.

use anyhow::Result;
use kestrel::expand_key;

use super::{parse_hex, parse_hex_array};

/// Encrypt (or decrypt) a single block and print it as hex.
pub fn aes_block(key: &str, block: &str, decrypt: bool) -> Result<()> {
    let key = parse_hex("key", key)?;
    let block = parse_hex_array::<16>("block", block)?;

    let schedule = expand_key(&key)?;
    log::info!(
        "AES-{} with {} rounds",
        schedule.key_size().key_len() * 8,
        schedule.rounds()
    );

    let out = if decrypt {
        schedule.decrypt_block(&block)
    } else {
        schedule.encrypt_block(&block)
    };
    println!("{}", hex::encode(out));
    Ok(())
}
