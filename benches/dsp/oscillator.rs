//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{Oscillator, OscillatorWaveform, RenderCtx};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in OscillatorWaveform::ALL {
            let mut osc = Oscillator::new();
            group.bench_with_input(
                BenchmarkId::new(waveform.name().to_lowercase(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        osc.render(
                            black_box(&mut buffer),
                            black_box(&ctx),
                            waveform,
                            black_box(0.5),
                            black_box(0.0),
                        );
                    })
                },
            );
        }

        // Detune adds a multiply per block, not per sample
        let mut osc = Oscillator::new();
        group.bench_with_input(BenchmarkId::new("sawtooth_detuned", size), &size, |b, _| {
            b.iter(|| {
                osc.render(
                    black_box(&mut buffer),
                    black_box(&ctx),
                    OscillatorWaveform::Sawtooth,
                    black_box(0.5),
                    black_box(25.0),
                );
            })
        });
    }

    group.finish();
}
