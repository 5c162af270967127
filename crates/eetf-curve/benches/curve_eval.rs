//! Tone curve evaluation benchmarks.
//!
//! Run with: `cargo bench -p eetf-curve`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use eetf_curve::{CurveCache, ReferenceOperator, ToneCurve};

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone_curve");
    let curve = ToneCurve::from_operator(&ReferenceOperator::default()).unwrap();

    for size in [1024usize, 65536, 1920 * 1080].iter() {
        let values: Vec<f64> = (0..*size).map(|i| i as f64 / *size as f64).collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.eval(black_box(x))).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("slice", size), &values, |b, v| {
            b.iter(|| curve.eval_slice(black_box(v)))
        });
    }

    let mut rgba = vec![0.5f32; 1920 * 1080 * 4];
    group.throughput(Throughput::Elements((1920 * 1080) as u64));
    group.bench_function("rgba_1080p", |b| {
        b.iter(|| curve.apply_rgba(black_box(&mut rgba)))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let op = ReferenceOperator::default();

    c.bench_function("build", |b| {
        b.iter(|| ToneCurve::from_luminance(black_box(&op), 400.0, 1000.0).unwrap())
    });

    let mut cache = CurveCache::new();
    c.bench_function("build_cached", |b| {
        b.iter(|| cache.get_for_luminance(black_box(&op), 400.0, 1000.0).unwrap())
    });
}

criterion_group!(benches, bench_eval, bench_build);
criterion_main!(benches);
