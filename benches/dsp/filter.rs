//! Benchmarks for the saturating state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::filter::{SVFilter, MAX_RESONANCE};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Fixed cutoff: one coefficient per block
        let mut filter = SVFilter::lowpass(1000.0);
        filter.set_resonance(0.7);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
            })
        });

        let mut filter = SVFilter::highpass(1000.0);
        filter.set_resonance(MAX_RESONANCE);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass_max_res", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
            })
        });

        // Per-sample cutoff: a sin() per sample for the coefficient
        let cutoff: Vec<f32> = (0..size)
            .map(|i| 1000.0 * (1.0 + 0.3 * (i as f32 * 0.01).sin()))
            .collect();
        let mut filter = SVFilter::lowpass(1000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass_modulated", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render_modulated(
                    black_box(&mut buffer),
                    black_box(&cutoff),
                    black_box(SAMPLE_RATE),
                );
            })
        });
    }

    group.finish();
}
