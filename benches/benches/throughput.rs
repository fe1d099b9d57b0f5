//! Kestrel Criterion Benchmark
//!
//! Latency and throughput for every primitive across input sizes.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kestrel::{expand_key, Ghash, SubkeyPowers, Unroll};
use kestrel_sip::{halfsiphash32, halfsiphash64, siphash64, SipHasher24};
use rand::prelude::*;
use rayon::prelude::*;
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut input = vec![0u8; len];
    rand::rng().fill(&mut input[..]);
    input
}

fn random_block() -> [u8; 16] {
    let mut block = [0u8; 16];
    rand::rng().fill(&mut block[..]);
    block
}

// =============================================================================
// BENCHMARK 1: AES
// =============================================================================

/// Key expansion and single-block latency for each key size.
fn bench_aes(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-AES");

    for key_len in [16, 24, 32] {
        let key = random_bytes(key_len);
        let schedule = expand_key(&key).unwrap();
        let block = random_block();
        let bits = key_len * 8;

        group.bench_function(BenchmarkId::new("expand", bits), |b| {
            b.iter(|| expand_key(black_box(&key)).unwrap());
        });

        group.throughput(Throughput::Bytes(16));
        group.bench_function(BenchmarkId::new("encrypt", bits), |b| {
            b.iter(|| schedule.encrypt_block(black_box(&block)));
        });
        group.bench_function(BenchmarkId::new("decrypt", bits), |b| {
            b.iter(|| schedule.decrypt_block(black_box(&block)));
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: GHASH
// =============================================================================

/// One-shot GHASH throughput from a single block up to bulk input.
fn bench_ghash(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-GHASH");
    let subkey = random_block();

    let sizes = [
        (16, "16B"),
        (256, "256B"),
        (4 * KB, "4KB"),
        (64 * KB, "64KB"),
        (MB, "1MB"),
    ];

    for (size, name) in sizes {
        let input = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| kestrel::ghash(black_box(&subkey), black_box(data)));
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: STREAMING
// =============================================================================

/// Streaming GHASH with awkward chunk sizes that force buffering.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Streaming");
    let subkey = random_block();
    let input = random_bytes(MB);
    group.throughput(Throughput::Bytes(MB as u64));

    for chunk in [7, 64, 1000, 16 * KB] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &input, |b, data| {
            b.iter(|| {
                let mut hasher = Ghash::new(&subkey);
                for piece in data.chunks(chunk) {
                    hasher.update(black_box(piece));
                }
                hasher.finalize()
            });
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 4: SHARED SUBKEY POWERS
// =============================================================================

/// Many messages under one subkey, hashed in parallel from shared powers.
fn bench_shared_powers(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Shared-Powers");
    group.sample_size(30);

    let powers = SubkeyPowers::new(&random_block());
    let messages: Vec<Vec<[u8; 16]>> = (0..256)
        .map(|_| (0..256).map(|_| random_block()).collect())
        .collect();
    group.throughput(Throughput::Bytes((256 * 256 * 16) as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            messages
                .iter()
                .map(|m| kestrel::ghash_update(&[0u8; 16], &powers, m, Unroll::Four))
                .collect::<Vec<_>>()
        });
    });

    group.bench_function("rayon", |b| {
        b.iter(|| {
            messages
                .par_iter()
                .map(|m| kestrel::ghash_update(&[0u8; 16], &powers, m, Unroll::Four))
                .collect::<Vec<_>>()
        });
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 5: SIPHASH
// =============================================================================

/// Hash-table-key sized inputs for SipHash and HalfSipHash.
fn bench_siphash(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-SipHash");
    let seed = random_block();
    let half_seed = u64::from_le_bytes(seed[..8].try_into().unwrap());

    for size in [8, 32, 128, KB, 16 * KB] {
        let input = random_bytes(size);
        let words: Vec<u32> = input
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes(w.try_into().unwrap()))
            .collect();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("siphash64", size), &input, |b, data| {
            b.iter(|| siphash64::<[u8; 8]>(black_box(&seed), black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("siphash128", size), &input, |b, data| {
            b.iter(|| siphash64::<[u8; 16]>(black_box(&seed), black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("streaming", size), &input, |b, data| {
            b.iter(|| {
                let mut hasher = SipHasher24::new(&seed);
                hasher.update(black_box(data));
                hasher.finalize()
            });
        });
        group.bench_with_input(BenchmarkId::new("halfsiphash32", size), &input, |b, data| {
            b.iter(|| halfsiphash32(black_box(half_seed), black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("halfsiphash64", size), &words, |b, data| {
            b.iter(|| halfsiphash64(black_box(half_seed), black_box(data)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_aes,
    bench_ghash,
    bench_streaming,
    bench_shared_powers,
    bench_siphash,
);
criterion_main!(benches);
