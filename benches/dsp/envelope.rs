//! Benchmarks for the ADSR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{AdsrSettings, Envelope};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (one exp() per sample); a long attack keeps it there
        let slow = AdsrSettings::new(1000.0, 0.1, 0.7, 0.3);
        let mut env = Envelope::new();
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), true, black_box(&slow), SAMPLE_RATE);
            })
        });

        // Sustain phase (holding steady)
        let fast = AdsrSettings::new(0.001, 0.001, 0.7, 1000.0);
        let mut env = Envelope::new();
        // Advance past attack/decay
        for _ in 0..200 {
            env.next_sample(true, &fast, SAMPLE_RATE);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), true, black_box(&fast), SAMPLE_RATE);
            })
        });

        // Release phase (ramping down)
        let mut env = Envelope::new();
        for _ in 0..200 {
            env.next_sample(true, &fast, SAMPLE_RATE);
        }
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), false, black_box(&fast), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
