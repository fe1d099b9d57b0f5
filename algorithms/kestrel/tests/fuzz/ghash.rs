use bolero::check;
use kestrel::{ghash, ghash_multiply_reduce, reflect, unreflect, FixedOperand, Ghash, Unroll};

#[test]
fn fuzz_ghash_unroll_and_split_equivalence() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        if data.len() < 16 {
            return;
        }
        let (h, msg) = data.split_at(16);
        let mut subkey = [0u8; 16];
        subkey.copy_from_slice(h);

        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let expected = ghash(&subkey, msg);

        // =============================================================================
        // UNROLL & SPLIT VARIATIONS
        // =============================================================================
        for unroll in [Unroll::One, Unroll::Two, Unroll::Three, Unroll::Four] {
            let mut hasher = Ghash::with_unroll(&subkey, unroll);
            hasher.update(msg);
            assert_eq!(hasher.finalize(), expected, "{unroll:?} mismatch");
        }

        if msg.len() > 1 {
            for split_idx in [1, msg.len() / 2, msg.len() - 1] {
                let (first, second) = msg.split_at(split_idx);
                let mut hasher = Ghash::new(&subkey);
                hasher.update(first);
                hasher.update(second);
                assert_eq!(hasher.finalize(), expected, "Split at {split_idx} mismatch");
            }
        }
    });
}

#[test]
fn fuzz_field_linearity_and_reflection() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        if data.len() < 48 {
            return;
        }
        let mut parts = [[0u8; 16]; 3];
        for (part, chunk) in parts.iter_mut().zip(data.chunks_exact(16)) {
            part.copy_from_slice(chunk);
        }
        let [a, b, c] = parts.map(|p| reflect(&p));

        assert_eq!(reflect(&unreflect(a)), a);
        assert_eq!(unreflect(a), parts[0]);

        let c = FixedOperand::new(c);
        assert_eq!(
            ghash_multiply_reduce(&c, a ^ b),
            ghash_multiply_reduce(&c, a) ^ ghash_multiply_reduce(&c, b)
        );
    });
}
