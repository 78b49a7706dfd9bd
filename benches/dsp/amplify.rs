//! Benchmarks for gain stages and layer crossfades.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{amplify, mix};

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        // Pre-allocate buffers
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let envelope: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();

        // VCA: signal × envelope
        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("multiply_in_place", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                amplify::multiply_in_place(black_box(&mut signal_copy), black_box(&envelope))
            })
        });

        // Master volume
        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("apply_gain", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                amplify::apply_gain(black_box(&mut signal_copy), black_box(0.25))
            })
        });

        // Sub-oscillator layer
        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                mix::crossfade_in_place(black_box(&mut signal_copy), black_box(&envelope), 0.3)
            })
        });
    }

    group.finish();
}
