use bolero::check;
use kestrel_sip::{siphash64, SipHasher128, SipHasher24};

#[test]
fn fuzz_streaming_consistency() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        if data.len() < 16 {
            return;
        }
        let (key, msg) = data.split_at(16);
        let mut seed = [0u8; 16];
        seed.copy_from_slice(key);

        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let narrow: [u8; 8] = siphash64(&seed, msg);
        let wide: [u8; 16] = siphash64(&seed, msg);

        // =============================================================================
        // STREAMING VARIATIONS
        // =============================================================================

        // 1. Single Update
        let mut hasher = SipHasher24::new(&seed);
        hasher.update(msg);
        assert_eq!(hasher.finalize(), narrow, "Streaming single update mismatch");

        // 2. Byte-by-Byte (Small Inputs Only)
        if msg.len() < 256 {
            let mut hasher = SipHasher128::new(&seed);
            for b in msg {
                hasher.update(&[*b]);
            }
            assert_eq!(hasher.finalize(), wide, "Byte-by-byte streaming mismatch");
        }

        // 3. Arbitrary Split Points
        if msg.len() > 1 {
            for split_idx in [1, msg.len() / 2, msg.len() - 1] {
                let (first, second) = msg.split_at(split_idx);
                let mut hasher = SipHasher24::new(&seed);
                hasher.update(first);
                hasher.update(second);
                assert_eq!(hasher.finalize(), narrow, "Split at {split_idx} mismatch");
            }
        }
    });
}
