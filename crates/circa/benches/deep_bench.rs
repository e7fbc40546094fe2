//! Criterion benchmarks for deep comparison.
//! Focus: flat sequences n in {16, 256, 4096}, a 64x64 grid, scalar
//! broadcast, and the zip-longest fill path for ragged lengths.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p circa

use circa::{deep_eq, deep_le, Nested};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn flat(n: usize, seed: u64) -> Nested {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1e3..1e3)).collect()
}

fn grid(side: usize, seed: u64) -> Nested {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..side)
        .map(|_| {
            (0..side)
                .map(|_| rng.gen_range(-1e3..1e3))
                .collect::<Nested>()
        })
        .collect()
}

/// Copy of `src` with every leaf moved by `rel` relatively: stays inside the
/// default band for `rel` below rtol.
fn nudged(src: &Nested, rel: f64) -> Nested {
    match src {
        Nested::Num(v) => Nested::Num(v * (1.0 + rel)),
        Nested::Seq(items) => Nested::Seq(items.iter().map(|item| nudged(item, rel)).collect()),
    }
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep");
    for &n in &[16usize, 256, 4096] {
        let xs = flat(n, 43);
        let ys = nudged(&xs, 1e-10);

        group.bench_with_input(BenchmarkId::new("all_within_band", n), &n, |b, _| {
            b.iter(|| deep_eq(&xs, &ys).all())
        });

        group.bench_with_input(BenchmarkId::new("collect_flat", n), &n, |b, _| {
            b.iter(|| deep_eq(&xs, &ys).collect_flat())
        });

        // First element far off: all() must return after one leaf.
        let mut first_miss = nudged(&xs, 1e-10);
        if let Nested::Seq(items) = &mut first_miss {
            items[0] = Nested::Num(1e9);
        }
        group.bench_with_input(BenchmarkId::new("all_first_miss", n), &n, |b, _| {
            b.iter(|| deep_eq(&xs, &first_miss).all())
        });

        // One element short: exercises the NaN fill on the last pairing.
        let mut ragged = nudged(&xs, 1e-10);
        if let Nested::Seq(items) = &mut ragged {
            items.pop();
        }
        group.bench_with_input(BenchmarkId::new("ragged_zip_longest", n), &n, |b, _| {
            b.iter(|| deep_eq(&xs, &ragged).collect_flat())
        });
    }

    let side = 64usize;
    let left = grid(side, 47);
    let right = nudged(&left, 1e-10);
    group.bench_with_input(BenchmarkId::new("materialize_grid", side), &side, |b, _| {
        b.iter(|| deep_eq(&left, &right).materialize())
    });

    let mid = Nested::from(0.0);
    group.bench_with_input(
        BenchmarkId::new("broadcast_le_scalar", side),
        &side,
        |b, _| b.iter(|| deep_le(&left, &mid).collect_flat()),
    );

    group.finish();
}

criterion_group!(benches, bench_deep);
criterion_main!(benches);
