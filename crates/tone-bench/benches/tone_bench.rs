//! Benchmarks for tone-rs pipeline stages.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tone_core::Image;
use tone_engine::{EngineConfig, LutKind, RgbEngine};
use tone_hist::{CumulativeHistogram, Histogram};
use tone_lut::{apply, Lut, LutDeriver};

/// A deterministic pseudo-random RGB image (xorshift over a counter).
fn noise_rgb(width: u32, height: u32) -> Image<u8, 3> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    let mut state = 0x9e3779b9u32;
    for _ in 0..width * height * 3 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        data.push((state >> 24) as u8);
    }
    Image::from_data(width, height, data).unwrap()
}

fn analyzed(img: &Image<u8, 3>) -> CumulativeHistogram<3> {
    let mut hist = Histogram::<3>::new(256, true);
    hist.accumulate(img, false).unwrap();
    let mut cum = CumulativeHistogram::<3>::new(256);
    cum.compute(&hist).unwrap();
    cum
}

/// Benchmark histogram accumulation across image sizes.
fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for size in [64u32, 256, 1024].iter() {
        let img = noise_rgb(*size, *size);
        let pixels = (*size as u64) * (*size as u64);
        group.throughput(Throughput::Elements(pixels));

        group.bench_with_input(BenchmarkId::new("accumulate", size), &img, |b, img| {
            let mut hist = Histogram::<3>::new(256, true);
            b.iter(|| hist.accumulate(black_box(img), false).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("cumulative", size), &img, |b, img| {
            let mut hist = Histogram::<3>::new(256, true);
            hist.accumulate(img, false).unwrap();
            let mut cum = CumulativeHistogram::<3>::new(256);
            b.iter(|| cum.compute(black_box(&hist)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark LUT derivation per kind.
fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    let img = noise_rgb(256, 256);
    let cum = analyzed(&img);

    for kind in [
        LutKind::ThresholdGray,
        LutKind::DynamicGray,
        LutKind::EqualizeGray,
        LutKind::ThresholdColor,
        LutKind::DynamicColor,
        LutKind::EqualizeColor,
        LutKind::Gamma,
        LutKind::Negative,
    ] {
        group.bench_function(format!("{kind:?}"), |b| {
            let mut deriver: LutDeriver<u8, 3> = LutDeriver::new();
            deriver.set_param(40.0);
            b.iter(|| {
                // Alternate kinds so memoized ones recompute every pass.
                deriver.set_kind(LutKind::Identity);
                deriver.derive(black_box(&cum)).unwrap();
                deriver.set_kind(kind);
                deriver.derive(black_box(&cum)).unwrap()
            })
        });
    }

    group.finish();
}

/// Benchmark LUT application across image sizes.
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    let negative: Lut<u8, 3> = Lut::Mono((0..=255u8).rev().collect());

    for size in [64u32, 256, 1024].iter() {
        let img = noise_rgb(*size, *size);
        let pixels = (*size as u64) * (*size as u64);
        group.throughput(Throughput::Elements(pixels));

        group.bench_with_input(BenchmarkId::new("mono", size), &img, |b, img| {
            b.iter(|| apply(black_box(img), black_box(&negative)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark one full engine update.
fn bench_engine_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for size in [64u32, 256].iter() {
        let img = noise_rgb(*size, *size);
        let pixels = (*size as u64) * (*size as u64);
        group.throughput(Throughput::Elements(pixels));

        group.bench_with_input(BenchmarkId::new("equalize_color", size), &img, |b, img| {
            let mut engine = RgbEngine::new(*size, *size, EngineConfig::default());
            engine.set_lut_kind(LutKind::EqualizeColor);
            b.iter(|| engine.update(black_box(img)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_histogram,
    bench_derive,
    bench_apply,
    bench_engine_update
);
criterion_main!(benches);
