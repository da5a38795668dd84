//! Converter benchmarks for pcmflow
//!
//! Run with: cargo bench --bench converter_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pcmflow::filter::{
    AutoCenter, BiasShift, BitDepthCast, ConverterChain, FillLeftRight, SampleConverter, Scaler,
    SwitchLeftRight,
};
use pcmflow::util::{StereoFrame, I24};

const BUFFER_SIZES: [usize; 3] = [256, 1024, 4096];

fn sine_frames(count: usize) -> Vec<StereoFrame<i16>> {
    (0..count)
        .map(|i| {
            let v = (12000.0 * (i as f64 * 0.01).sin()) as i16;
            [v, v / 2]
        })
        .collect()
}

/// Benchmark the individual in-place converters
fn bench_converters(c: &mut Criterion) {
    let mut group = c.benchmark_group("converters");

    for &size in &BUFFER_SIZES {
        let input = sine_frames(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scaler", size), &input, |b, input| {
            let mut scaler = Scaler::new(0.8, 0i16, i16::MAX);
            let mut frames = input.clone();
            b.iter(|| scaler.convert(black_box(&mut frames)))
        });

        group.bench_with_input(BenchmarkId::new("auto_center", size), &input, |b, input| {
            let mut center = AutoCenter::new();
            let mut frames = input.clone();
            b.iter(|| center.convert(black_box(&mut frames)))
        });

        group.bench_with_input(BenchmarkId::new("switch", size), &input, |b, input| {
            let mut frames = input.clone();
            b.iter(|| SwitchLeftRight.convert(black_box(&mut frames)))
        });

        group.bench_with_input(BenchmarkId::new("bias_shift", size), &input, |b, input| {
            let mut bias = BiasShift::default();
            let mut frames = input.clone();
            b.iter(|| bias.convert(black_box(&mut frames)))
        });
    }

    group.finish();
}

/// Benchmark a typical output chain
fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    let input = sine_frames(1024);
    group.throughput(Throughput::Elements(1024));

    group.bench_function("fill_scale_bias", |b| {
        let mut chain = ConverterChain::<i16>::new()
            .add(FillLeftRight::new())
            .add(Scaler::new(0.5, 0, i16::MAX))
            .add(BiasShift::default());
        let mut frames = input.clone();
        b.iter(|| chain.convert(black_box(&mut frames)))
    });

    group.finish();
}

/// Benchmark bit depth casts
fn bench_bit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_depth");
    let wide: Vec<StereoFrame<I24>> = (0..4096)
        .map(|i| [I24::new_clamped(i * 1000), I24::new_clamped(-i * 1000)])
        .collect();
    let mut narrow = vec![[0i16; 2]; wide.len()];
    group.throughput(Throughput::Elements(wide.len() as u64));

    group.bench_function("24_to_16", |b| {
        let cast = BitDepthCast::narrow_24_to_16();
        b.iter(|| cast.convert(black_box(&wide), &mut narrow))
    });

    group.bench_function("24_to_float", |b| {
        let cast = BitDepthCast::widen_24_to_float();
        b.iter(|| black_box(cast.convert_to_vec(&wide)))
    });

    group.finish();
}

criterion_group!(benches, bench_converters, bench_chain, bench_bit_depth);
criterion_main!(benches);
