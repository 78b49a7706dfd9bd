//! Benchmarks for tanh saturation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::distortion;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Output stage drive
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("soft_clip", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::soft_clip_buffer(
                    black_box(&mut buffer),
                    black_box(distortion::OUTPUT_DRIVE),
                );
            })
        });

        // Heavy drive keeps tanh in its flat region
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("soft_clip_hot", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::soft_clip_buffer(black_box(&mut buffer), black_box(20.0));
            })
        });
    }

    group.finish();
}
