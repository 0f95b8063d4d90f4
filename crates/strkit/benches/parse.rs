//! Benchmark – strict parsers against `core`'s `FromStr`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strkit::{parse_escaped, parse_float, parse_int};

/// Deterministic mix of decimal tokens across the `i64` range.
fn decimal_tokens() -> Vec<String> {
    let mut x: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..1_000)
        .map(|i| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            let value = i64::from_ne_bytes(x.to_ne_bytes()) >> (i % 64);
            value.to_string()
        })
        .collect()
}

fn bench_int(c: &mut Criterion) {
    let tokens = decimal_tokens();
    let mut group = c.benchmark_group("parse_int");
    group.bench_function("strkit_i64", |b| {
        b.iter(|| {
            tokens
                .iter()
                .map(|t| parse_int::<i64>(black_box(t), 10).unwrap_or(0))
                .fold(0i64, i64::wrapping_add)
        });
    });
    group.bench_function("core_i64", |b| {
        b.iter(|| {
            tokens
                .iter()
                .map(|t| black_box(t).parse::<i64>().unwrap_or(0))
                .fold(0i64, i64::wrapping_add)
        });
    });
    group.bench_function("strkit_u8_auto_radix", |b| {
        b.iter(|| {
            ["0x7f", "0377", "255", "0"]
                .iter()
                .map(|t| u32::from(parse_int::<u8>(black_box(t), 0).unwrap_or(0)))
                .sum::<u32>()
        });
    });
    group.finish();
}

fn bench_float(c: &mut Criterion) {
    let tokens: Vec<String> = (1..1_000).map(|i| (f64::from(i) * 1.37e-3).to_string()).collect();
    let mut group = c.benchmark_group("parse_float");
    group.bench_function("strkit_f64", |b| {
        b.iter(|| {
            tokens
                .iter()
                .map(|t| parse_float::<f64>(black_box(t)).unwrap_or(0.0))
                .sum::<f64>()
        });
    });
    group.bench_function("core_f64", |b| {
        b.iter(|| {
            tokens
                .iter()
                .map(|t| black_box(t).parse::<f64>().unwrap_or(0.0))
                .sum::<f64>()
        });
    });
    group.finish();
}

fn bench_escaped(c: &mut Criterion) {
    let tokens = ["a", "\\n", "\\x41", "\\101", "\\\\", "\\q"];
    c.bench_function("parse_escaped_u8", |b| {
        b.iter(|| {
            tokens
                .iter()
                .map(|t| u32::from(parse_escaped::<u8>(black_box(t)).unwrap_or(0)))
                .sum::<u32>()
        });
    });
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_int, bench_float, bench_escaped }
criterion_main!(benches);
