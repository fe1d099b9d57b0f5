//! Unroll Comparison Benchmark
//!
//! Compares the four GHASH unroll factors on the same input, plus the raw
//! field kernels they are built from.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use kestrel::{
    ghash_multiply_reduce, ghash_update, FieldElement, FixedOperand, SubkeyPowers, Unroll,
};
use std::hint::black_box;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_unroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("GHASH Unroll");

    // Scenarios:
    // - 3 blocks: shorter than the widest group, leftovers only
    // - 64 blocks: L1 hot path
    // - 16384 blocks: bulk throughput
    let sizes = [3, 64, 16 * 1024];
    let subkey: [u8; 16] = core::array::from_fn(|i| (i as u8).wrapping_mul(0x3b) ^ 0xa5);

    for blocks in sizes {
        let input: Vec<[u8; 16]> = (0..blocks)
            .map(|n| core::array::from_fn(|i| (n as u8) ^ (i as u8)))
            .collect();
        group.throughput(Throughput::Bytes((blocks * 16) as u64));

        for unroll in [Unroll::One, Unroll::Two, Unroll::Three, Unroll::Four] {
            // Powers are cached before timing starts
            let powers = SubkeyPowers::new(&subkey);
            let _ = powers.powers(unroll);

            group.bench_function(format!("{} lane(s) - {blocks} blocks", unroll.lanes()), |b| {
                b.iter(|| ghash_update(&[0u8; 16], &powers, black_box(&input), unroll));
            });
        }
    }
    group.finish();
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("GF(2^128) Kernels");

    let a = FieldElement::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
    let h = FixedOperand::new(FieldElement::new(0x66e9_4bd4_ef8a_2c3b, 0x884c_fa59_ca34_2b2e));

    group.bench_function("multiply + reduce", |b| {
        b.iter(|| ghash_multiply_reduce(black_box(&h), black_box(a)));
    });
    group.finish();
}

criterion_group!(benches, bench_unroll, bench_field);
criterion_main!(benches);
