//! Selftest Command
//!
//! Known-answer checks for every primitive, printed as `name: OK|FAILED`.

use anyhow::{bail, Result};
use kestrel::{expand_key, ghash_subkey, Block128, Ghash, Unroll};
use kestrel_sip::{halfsiphash32, halfsiphash64, siphash64};

// FIPS-197 Appendix C.1
const AES_KEY: &str = "000102030405060708090a0b0c0d0e0f";
const AES_PLAIN: &str = "00112233445566778899aabbccddeeff";
const AES_CIPHER: &str = "69c4e0d86a7b0430d8cdb78070b4c55a";

// GCM test case 2: H for the all-zero key, one ciphertext block, length block
const GCM_SUBKEY: &str = "66e94bd4ef8a2c3b884cfa59ca342b2e";
const GCM_INPUT: &str = "0388dace60b6a392f328c2b971b2fe7800000000000000000000000000000080";
const GCM_GHASH: &str = "f38cbb1ad69223dcc3457ae5b6b0f885";

const SIP_KEY: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
const HALF_SEED: u64 = 0x0706_0504_0302_0100;

/// Run every check and fail if any of them did.
pub fn selftest() -> Result<()> {
    let checks: [(&str, fn() -> Result<bool>); 6] = [
        ("AES-128 encrypt", aes_encrypt),
        ("AES-128 decrypt", aes_decrypt),
        ("GHASH subkey", subkey),
        ("GHASH all unrolls", ghash_unrolls),
        ("SipHash-2-4", siphash),
        ("HalfSipHash-2-4", halfsiphash),
    ];

    let mut failed = 0usize;
    for (name, check) in checks {
        match check() {
            Ok(true) => println!("{name}: OK"),
            Ok(false) => {
                println!("{name}: FAILED");
                failed += 1;
            }
            Err(e) => {
                println!("{name}: FAILED ({e:#})");
                failed += 1;
            }
        }
    }

    println!();
    if failed > 0 {
        bail!("{failed} of {} checks failed", checks.len());
    }
    println!("All {} checks passed", checks.len());
    Ok(())
}

fn block(value: &str) -> Result<Block128> {
    super::parse_hex_array::<16>("vector", value)
}

fn aes_encrypt() -> Result<bool> {
    let schedule = expand_key(&hex::decode(AES_KEY)?)?;
    Ok(schedule.encrypt_block(&block(AES_PLAIN)?) == block(AES_CIPHER)?)
}

fn aes_decrypt() -> Result<bool> {
    let schedule = expand_key(&hex::decode(AES_KEY)?)?;
    Ok(schedule.decrypt_block(&block(AES_CIPHER)?) == block(AES_PLAIN)?)
}

fn subkey() -> Result<bool> {
    Ok(ghash_subkey(&[0u8; 16])? == block(GCM_SUBKEY)?)
}

fn ghash_unrolls() -> Result<bool> {
    let h = block(GCM_SUBKEY)?;
    let input = hex::decode(GCM_INPUT)?;
    let expected = block(GCM_GHASH)?;

    let all_match = [Unroll::One, Unroll::Two, Unroll::Three, Unroll::Four]
        .into_iter()
        .all(|unroll| {
            let mut hasher = Ghash::with_unroll(&h, unroll);
            hasher.update(&input);
            hasher.verify(&expected)
        });
    Ok(all_match && kestrel::ghash(&h, &input) == expected)
}

fn siphash() -> Result<bool> {
    let narrow: [u8; 8] = siphash64(&SIP_KEY, &[]);
    let wide: [u8; 16] = siphash64(&SIP_KEY, &[]);
    Ok(hex::encode(narrow) == "310e0edd47db6f72"
        && hex::encode(wide) == "a3817f04ba25a8e66df67214c7550293")
}

fn halfsiphash() -> Result<bool> {
    Ok(halfsiphash32(HALF_SEED, &[]) == 0x5b9f_35a9
        && halfsiphash32(HALF_SEED, &[0]) == 0xb85a_4727
        && halfsiphash64(HALF_SEED, &[]) == 0xc83c_b8b9_591f_8d21)
}
