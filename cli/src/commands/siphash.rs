//! SipHash Command
//!
//! Keyed file hashing with SipHash-2-4, 64- or 128-bit tags.

use anyhow::Result;
use kestrel_sip::{SipHasher128, SipHasher24};
use std::path::PathBuf;

use super::{digest_files, parse_hex_array, stream_file};

/// SipHash each file under `seed`.
pub fn siphash_files(files: &[PathBuf], seed: &str, wide: bool) -> Result<()> {
    let seed = parse_hex_array::<16>("seed", seed)?;

    if wide {
        digest_files(files, |path| {
            let mut hasher = SipHasher128::new(&seed);
            stream_file(path, |chunk| hasher.update(chunk))?;
            Ok(hasher.finalize().to_vec())
        })
    } else {
        digest_files(files, |path| {
            let mut hasher = SipHasher24::new(&seed);
            stream_file(path, |chunk| hasher.update(chunk))?;
            Ok(hasher.finalize().to_vec())
        })
    }
}
