use bolero::check;
use kestrel::{expand_key, AesKeySchedule};

#[test]
fn fuzz_aes_round_trip() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        // First byte picks the key size, then key bytes, then one block.
        let Some((&selector, rest)) = data.split_first() else {
            return;
        };
        let key_len = [16, 24, 32][usize::from(selector % 3)];
        if rest.len() < key_len + 16 {
            return;
        }
        let (key, tail) = rest.split_at(key_len);
        let mut block = [0u8; 16];
        block.copy_from_slice(&tail[..16]);

        let Ok(schedule) = expand_key(key) else {
            panic!("valid {key_len}-byte key rejected");
        };
        let ct = schedule.encrypt_block(&block);
        assert_eq!(schedule.decrypt_block(&ct), block, "round-trip mismatch");
        assert_eq!(schedule.encrypt_block(&schedule.decrypt_block(&block)), block);
    });
}

#[test]
fn fuzz_key_length_validation() {
    check!().with_type::<Vec<u8>>().for_each(|key| {
        let accepted = expand_key(key).is_ok();
        assert_eq!(accepted, matches!(key.len(), 16 | 24 | 32));

        let expanded = AesKeySchedule::from_le_words(key).is_ok();
        assert_eq!(expanded, matches!(key.len(), 176 | 208 | 240));
    });
}
