//! Tests for the `digest` trait integration.
#![cfg(feature = "digest-trait")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Verifies that `SipHasher` implements the RustCrypto MAC traits and can be
//! used in generic contexts.

use kestrel_sip::digest::{KeyInit, Mac};
use kestrel_sip::{siphash64, SipHasher128, SipHasher24};

// Helper functions moved out of test body to satisfy `items_after_statements`
fn mac_generic<M: Mac + KeyInit>(key: &[u8], input: &[u8]) -> Vec<u8> {
    let mut m = <M as KeyInit>::new_from_slice(key).expect("Key length mismatch");
    Mac::update(&mut m, input);
    m.finalize().into_bytes().to_vec()
}

#[test]
fn test_mac_trait_usage() {
    let key = [0x42u8; 16];

    // 1. Narrow output via the trait
    let res = mac_generic::<SipHasher24>(&key, b"test");
    let native: [u8; 8] = siphash64(&key, b"test");
    assert_eq!(res.as_slice(), native);

    // 2. Wide output via the trait
    let res = mac_generic::<SipHasher128>(&key, b"test");
    let native: [u8; 16] = siphash64(&key, b"test");
    assert_eq!(res.as_slice(), native);
}

#[test]
fn test_mac_verify() {
    let key = [7u8; 16];
    let tag: [u8; 8] = siphash64(&key, b"authenticated");

    let mut m = <SipHasher24 as KeyInit>::new_from_slice(&key).unwrap();
    Mac::update(&mut m, b"authenticated");
    assert!(m.verify_slice(&tag).is_ok());

    let mut m = <SipHasher24 as KeyInit>::new_from_slice(&key).unwrap();
    Mac::update(&mut m, b"tampered");
    assert!(m.verify_slice(&tag).is_err());
}

#[test]
fn test_wrong_key_length_rejected() {
    assert!(<SipHasher24 as KeyInit>::new_from_slice(&[0u8; 15]).is_err());
    assert!(<SipHasher24 as KeyInit>::new_from_slice(&[0u8; 32]).is_err());
}
