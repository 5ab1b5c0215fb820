//! Throughput of the core operations at each width.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fpemu_core::{Binary16, Binary64, Float16, Float32, Float64};

fn bench_binary32(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary32");
    let a = Float32::from_f32(1.000_123_4);
    let b = Float32::from_f32(-3.141_592_6e7);

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b))
    });
    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });
    group.bench_function("div", |bencher| {
        bencher.iter(|| black_box(a) / black_box(b))
    });
    group.finish();
}

fn bench_binary64(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary64");
    let a = Float64::from_f64(core::f64::consts::PI);
    let b = Float64::from_f64(-1.0e-300);

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(a) + black_box(b))
    });
    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(a) * black_box(b))
    });
    group.bench_function("div", |bencher| {
        bencher.iter(|| black_box(a) / black_box(b))
    });
    group.finish();
}

fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let narrow = Float16::from_bits(0x3555);
    let wide = Float64::from_f64(65519.97);

    group.bench_function("widen16to64", |bencher| {
        bencher.iter(|| black_box(narrow).convert::<Binary64>())
    });
    group.bench_function("narrow64to16", |bencher| {
        bencher.iter(|| black_box(wide).convert::<Binary16>())
    });
    group.bench_function("int_to_float", |bencher| {
        bencher.iter(|| Float64::from(black_box(0x0012_3456_789A_BCDEu64)))
    });
    group.finish();
}

criterion_group!(benches, bench_binary32, bench_binary64, bench_conversions);
criterion_main!(benches);
