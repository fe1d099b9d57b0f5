//! Consistency & Regression Tests
//!
//! Verifies agreement between the different ways of reaching the same result.
//! - Encrypt / decrypt round-trip on random keys
//! - Raw key expansion vs. pre-expanded little-endian schedules
//! - One-shot vs. streaming vs. block-level GHASH
//! - Unroll factors and shared subkey-power caches

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use kestrel::{
    expand_key, ghash, ghash_update, AesKeySchedule, Block128, Ghash, SubkeyPowers, Unroll,
};
use rand::prelude::*;

const UNROLLS: [Unroll; 4] = [Unroll::One, Unroll::Two, Unroll::Three, Unroll::Four];

fn random_block() -> Block128 {
    let mut b = [0u8; 16];
    rand::rng().fill(&mut b[..]);
    b
}

// =============================================================================
// AES
// =============================================================================

#[test]
fn test_aes_round_trip_random_keys() {
    for len in [16, 24, 32] {
        for _ in 0..64 {
            let mut key = vec![0u8; len];
            rand::rng().fill(&mut key[..]);
            let schedule = expand_key(&key).unwrap();

            let pt = random_block();
            let ct = schedule.encrypt_block(&pt);
            assert_eq!(schedule.decrypt_block(&ct), pt, "round-trip failed for {len}-byte key");
        }
    }
}

#[test]
fn test_le_schedule_reproduces_raw_key() {
    let mut key = [0u8; 32];
    rand::rng().fill(&mut key[..]);
    let schedule = expand_key(&key).unwrap();

    let le: Vec<u8> = schedule
        .round_keys()
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect();
    assert_eq!(le.len(), 240);

    let loaded = AesKeySchedule::from_le_words(&le).unwrap();
    for _ in 0..16 {
        let pt = random_block();
        assert_eq!(loaded.encrypt_block(&pt), schedule.encrypt_block(&pt));
        assert_eq!(loaded.decrypt_block(&pt), schedule.decrypt_block(&pt));
    }
}

#[test]
fn test_be_schedule_is_not_accepted_as_le() {
    // Feeding big-endian words where little-endian ones are expected must not
    // silently give the same cipher.
    let schedule = expand_key(&[0x5Au8; 16]).unwrap();
    let be: Vec<u8> = schedule
        .round_keys()
        .iter()
        .flat_map(|w| w.to_be_bytes())
        .collect();
    let wrong = AesKeySchedule::from_le_words(&be).unwrap();
    let pt = [0u8; 16];
    assert_ne!(wrong.encrypt_block(&pt), schedule.encrypt_block(&pt));
}

// =============================================================================
// GHASH
// =============================================================================

#[test]
fn test_oneshot_streaming_and_blocks_agree() {
    let h = random_block();
    let powers = SubkeyPowers::new(&h);

    for blocks in [0usize, 1, 2, 3, 4, 5, 7, 8, 9, 16, 33] {
        let mut data = vec![0u8; blocks * 16];
        rand::rng().fill(&mut data[..]);
        let as_blocks: Vec<Block128> = data
            .chunks_exact(16)
            .map(|c| c.try_into().unwrap())
            .collect();

        let oneshot = ghash(&h, &data);
        for unroll in UNROLLS {
            let mut hasher = Ghash::with_unroll(&h, unroll);
            hasher.update(&data);
            assert_eq!(hasher.finalize(), oneshot, "streaming, {blocks} blocks, {unroll:?}");
            assert_eq!(
                ghash_update(&[0u8; 16], &powers, &as_blocks, unroll),
                oneshot,
                "block-level, {blocks} blocks, {unroll:?}"
            );
        }
    }
}

#[test]
fn test_update_chains_through_state() {
    // Absorbing A then B equals absorbing A || B.
    let h = random_block();
    let powers = SubkeyPowers::new(&h);
    let blocks: Vec<Block128> = (0..11).map(|_| random_block()).collect();

    let all = ghash_update(&[0u8; 16], &powers, &blocks, Unroll::Four);
    for split in 0..=blocks.len() {
        let mid = ghash_update(&[0u8; 16], &powers, &blocks[..split], Unroll::Three);
        let end = ghash_update(&mid, &powers, &blocks[split..], Unroll::Two);
        assert_eq!(end, all, "split at {split}");
    }
}

#[test]
fn test_shared_powers_across_threads() {
    let h = random_block();
    let powers = SubkeyPowers::new(&h);
    let blocks: Vec<Block128> = (0..64).map(|_| random_block()).collect();
    let expected = ghash_update(&[0u8; 16], &SubkeyPowers::new(&h), &blocks, Unroll::One);

    std::thread::scope(|s| {
        for unroll in UNROLLS {
            let powers = &powers;
            let blocks = &blocks;
            s.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(ghash_update(&[0u8; 16], powers, blocks, unroll), expected);
                }
            });
        }
    });
    assert!(powers.is_cached(Unroll::Four));
}

#[test]
fn test_subkey_from_aes_matches_helper() {
    let key = [0x11u8; 24];
    let h = kestrel::ghash_subkey(&key).unwrap();
    assert_eq!(h, expand_key(&key).unwrap().encrypt_block(&[0u8; 16]));
    assert!(kestrel::ghash_subkey(&key[..20]).is_err());
}
