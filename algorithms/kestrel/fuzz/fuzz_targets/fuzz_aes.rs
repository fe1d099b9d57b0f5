#![no_main]

use kestrel::{expand_key, AesKeySchedule};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Key size from the first byte, then key material, then blocks
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let key_len = [16, 24, 32][selector as usize % 3];
    if rest.len() < key_len {
        return;
    }
    let (key, blocks) = rest.split_at(key_len);
    let schedule = expand_key(key).unwrap();

    // =============================================================================
    // 1. ROUND-TRIP
    // =============================================================================

    for chunk in blocks.chunks_exact(16) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);

        let ct = schedule.encrypt_block(&block);
        assert_eq!(schedule.decrypt_block(&ct), block, "decrypt(encrypt(p)) != p");
    }

    // =============================================================================
    // 2. PRE-EXPANDED SCHEDULE
    // =============================================================================

    let le: Vec<u8> = schedule
        .round_keys()
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();
    let loaded = AesKeySchedule::from_le_words(&le).unwrap();
    assert_eq!(
        loaded.ghash_subkey(),
        schedule.ghash_subkey(),
        "Little-endian schedule load differs from raw key expansion"
    );
});
