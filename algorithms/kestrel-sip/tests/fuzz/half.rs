use bolero::check;
use kestrel_sip::{halfsiphash32, halfsiphash32_u16, halfsiphash64, siphash64, verify_mac};

#[test]
fn fuzz_u16_units_match_le_bytes() {
    check!().with_type::<(u64, Vec<u16>)>().for_each(|(seed, units)| {
        let bytes: Vec<u8> = units.iter().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(halfsiphash32_u16(*seed, units), halfsiphash32(*seed, &bytes));
    });
}

#[test]
fn fuzz_halfsiphash_deterministic() {
    check!().with_type::<(u64, Vec<u32>)>().for_each(|(seed, words)| {
        assert_eq!(halfsiphash64(*seed, words), halfsiphash64(*seed, words));
        // The seed always matters for non-trivial changes.
        assert_ne!(
            halfsiphash64(*seed, words),
            halfsiphash64(seed ^ 0x8000_0000_0000_0001, words)
        );
    });
}

#[test]
fn fuzz_mac_rejects_flipped_bits() {
    check!().with_type::<([u8; 16], Vec<u8>, u8)>().for_each(|(seed, msg, bit)| {
        let tag: [u8; 8] = siphash64(seed, msg);
        assert!(verify_mac(seed, msg, &tag));

        let mut bad = tag;
        bad[usize::from(bit / 8) % 8] ^= 1 << (bit % 8);
        assert!(!verify_mac(seed, msg, &bad));
    });
}
