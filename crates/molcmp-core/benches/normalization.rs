//! Benchmarks for the formula normalizer and the table comparator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use molcmp_core::{compare_rows, normalize, CompareOptions, IgnoreSet};

/// Short formula with a repeat unit, the common case in real tables.
fn bench_normalize_short(c: &mut Criterion) {
    let ignore = IgnoreSet::default();
    c.bench_function("normalize_short", |b| {
        b.iter(|| normalize(black_box("C4H7N2O3R(C2H2NOR)n'"), &ignore));
    });
}

/// Long formula with large counts, dominated by rendering.
fn bench_normalize_large_counts(c: &mut Criterion) {
    let ignore = IgnoreSet::default();
    let formula = "C120H240N40O60R12".repeat(20);
    c.bench_function("normalize_large_counts", |b| {
        b.iter(|| normalize(black_box(&formula), &ignore));
    });
}

/// 10k-row table through the full row pipeline.
fn bench_compare_rows_10k(c: &mut Criterion) {
    let mut input = String::from("a;b\n");
    for _ in 0..10_000 {
        input.push_str("C6H8N2O2R2';A2C6H8N2O2'\n");
    }
    let options = CompareOptions::default();
    c.bench_function("compare_rows_10k", |b| {
        b.iter(|| {
            let summary = compare_rows(black_box(input.as_bytes()), std::io::sink(), &options)
                .expect("compare");
            assert_eq!(summary.rows, 10_000);
        });
    });
}

criterion_group!(
    benches,
    bench_normalize_short,
    bench_normalize_large_counts,
    bench_compare_rows_10k
);
criterion_main!(benches);
