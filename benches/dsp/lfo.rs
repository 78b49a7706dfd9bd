//! Benchmarks for the low-frequency oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{Lfo, LfoWaveform};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in LfoWaveform::ALL {
            let mut lfo = Lfo::new();
            group.bench_with_input(
                BenchmarkId::new(waveform.name().to_lowercase().replace(|c: char| !c.is_alphanumeric(), "_"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        lfo.render(
                            black_box(&mut buffer),
                            black_box(5.0),
                            waveform,
                            black_box(SAMPLE_RATE),
                        );
                    })
                },
            );
        }
    }

    group.finish();
}
