#![no_main]

use kestrel::{Ghash, Unroll};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 18 {
        return;
    }
    let mut subkey = [0u8; 16];
    subkey.copy_from_slice(&data[..16]);

    // Chunk size from byte 16 (1 to 255), unroll factor from byte 17
    let chunk_size = (data[16] as usize % 255) + 1;
    let unroll = Unroll::from_lanes(data[17] as usize % 4 + 1).unwrap();
    let msg = &data[18..];

    // Reference: sequential, single update
    let reference = kestrel::ghash(&subkey, msg);

    let mut hasher = Ghash::with_unroll(&subkey, unroll);
    for chunk in msg.chunks(chunk_size) {
        hasher.update(chunk);
    }

    // They must be identical
    assert_eq!(
        reference,
        hasher.finalize(),
        "Chunked / unrolled GHASH differs from one-shot"
    );
});
