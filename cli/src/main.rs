//! Kestrel CLI
//!
//! Single-block AES, GHASH and SipHash from the command line.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "kestrel")]
#[command(about = "Portable AES, GHASH and SipHash primitives", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt or decrypt one 16-byte block
    Aes {
        /// AES key, 16/24/32 bytes in hex
        #[arg(short, long)]
        key: String,

        /// Input block, 16 bytes in hex
        #[arg(short, long)]
        block: String,

        /// Run the inverse cipher
        #[arg(short, long)]
        decrypt: bool,
    },

    /// GHASH files, zero-padding each to a whole block
    Ghash {
        /// Hash subkey H, 16 bytes in hex
        #[arg(short = 'H', long, required_unless_present = "key", conflicts_with = "key")]
        subkey: Option<String>,

        /// Derive H = AES_K(0^128) from this AES key
        #[arg(short, long)]
        key: Option<String>,

        /// Blocks folded per reduction (1-4)
        #[arg(
            short,
            long,
            default_value_t = 4,
            value_parser = clap::value_parser!(u8).range(1..=4)
        )]
        unroll: u8,

        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// SipHash-2-4 files
    Siphash {
        /// 16-byte seed in hex
        #[arg(short, long)]
        seed: String,

        /// 128-bit output
        #[arg(short, long)]
        wide: bool,

        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Check the built-in known-answer vectors
    Selftest,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Aes {
            key,
            block,
            decrypt,
        } => commands::aes_block(key, block, *decrypt)?,
        Commands::Ghash {
            subkey,
            key,
            unroll,
            files,
        } => {
            let subkey = commands::resolve_subkey(subkey.as_deref(), key.as_deref())?;
            commands::ghash_files(files, &subkey, usize::from(*unroll))?;
        }
        Commands::Siphash { seed, wide, files } => commands::siphash_files(files, seed, *wide)?,
        Commands::Selftest => commands::selftest()?,
    }

    Ok(())
}
