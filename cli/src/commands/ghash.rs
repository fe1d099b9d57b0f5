//! GHASH Command
//!
//! Files are hashed independently under one subkey. Every Rayon worker
//! starts from a clone of one template hasher whose subkey powers are
//! already computed.

use anyhow::{Context, Result};
use kestrel::{ghash_subkey, Block128, Ghash, SubkeyPowers, Unroll};
use std::path::PathBuf;

use super::{digest_files, parse_hex, parse_hex_array, stream_file};

/// Pick H from `--subkey`, or derive it from `--key`.
pub fn resolve_subkey(subkey: Option<&str>, key: Option<&str>) -> Result<Block128> {
    match (subkey, key) {
        (Some(h), _) => parse_hex_array::<16>("subkey", h),
        (None, Some(k)) => {
            let key = parse_hex("key", k)?;
            Ok(ghash_subkey(&key)?)
        }
        (None, None) => anyhow::bail!("either --subkey or --key is required"),
    }
}

/// GHASH each file, zero-padding its final partial block.
pub fn ghash_files(files: &[PathBuf], subkey: &Block128, lanes: usize) -> Result<()> {
    let unroll = Unroll::from_lanes(lanes).context("--unroll must be between 1 and 4")?;
    let template = Ghash::with_powers(SubkeyPowers::new(subkey), unroll);
    log::debug!("hashing {} file(s) with {} lane(s)", files.len(), unroll.lanes());

    digest_files(files, |path| {
        let mut hasher = template.clone();
        stream_file(path, |chunk| hasher.update(chunk))?;
        Ok(hasher.finalize().to_vec())
    })
}
