//! CLI Commands
//!
//! All kestrel CLI commands organized as separate modules, plus the shared
//! hex parsing and parallel file driver.

mod aes;
mod ghash;
mod selftest;
mod siphash;

pub use aes::aes_block;
pub use ghash::{ghash_files, resolve_subkey};
pub use selftest::selftest;
pub use siphash::siphash_files;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const READ_BUFFER: usize = 128 * 1024;

// =============================================================================
// HEX ARGUMENTS
// =============================================================================

/// Decode a hex argument of any length.
pub fn parse_hex(name: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).with_context(|| format!("--{name} is not valid hex"))
}

/// Decode a hex argument that must be exactly `N` bytes.
pub fn parse_hex_array<const N: usize>(name: &str, value: &str) -> Result<[u8; N]> {
    let bytes = parse_hex(name, value)?;
    match <[u8; N]>::try_from(bytes.as_slice()) {
        Ok(array) => Ok(array),
        Err(_) => bail!("--{name} must be {N} bytes, got {}", bytes.len()),
    }
}

// =============================================================================
// FILE DRIVER
// =============================================================================

/// Stream `path` through `sink` in fixed-size reads.
pub fn stream_file(path: &Path, mut sink: impl FnMut(&[u8])) -> Result<()> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut buffer = vec![0u8; READ_BUFFER];

    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        if n == 0 {
            break;
        }
        sink(&buffer[..n]);
    }
    Ok(())
}

/// Digest every file in parallel and print `hex  path` lines in input order.
pub fn digest_files<F>(files: &[PathBuf], digest: F) -> Result<()>
where
    F: Fn(&Path) -> Result<Vec<u8>> + Sync,
{
    let results: Vec<Result<Vec<u8>>> = files
        .par_iter()
        .map(|path| digest(path.as_path()))
        .collect();

    let mut failed = 0usize;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(tag) => println!("{}  {}", hex::encode(tag), path.display()),
            Err(e) => {
                eprintln!("Error: {}: {e:#}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("Failed to hash {failed} file(s)");
    }
    Ok(())
}
