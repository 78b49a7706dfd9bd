//! Benchmarks for the complete voice chain.
//!
//! Every scenario holds a note so the whole chain runs: oscillator, sub
//! and noise layers, LFO-modulated filter, envelope and output stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::{
    dsp::LfoWaveform,
    patch::Preset,
    synth::{MonoSynth, Voice, VoiceParams},
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn held_voice(params: &VoiceParams) -> Voice {
    let mut voice = Voice::new(SAMPLE_RATE);
    voice.set_parameters(params);
    voice.note_on(110.0); // A2, typical bass note
    voice
}

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === DEFAULT PATCH ===
        // saw + sub, LFO on cutoff: the baseline cost of a sounding note
        let mut voice = held_voice(&VoiceParams::default());
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| voice.render(black_box(&mut buffer)))
        });

        // === PRESETS ===
        for preset in Preset::ALL {
            let mut voice = held_voice(&preset.params());
            group.bench_with_input(
                BenchmarkId::new(preset.name().to_lowercase(), size),
                &size,
                |b, _| b.iter(|| voice.render(black_box(&mut buffer))),
            );
        }

        // === EVERYTHING ON ===
        // noise layer and sample & hold on top of the default patch
        let busy = VoiceParams {
            noise_level: 0.2,
            lfo_waveform: LfoWaveform::SampleAndHold,
            lfo_rate: 12.0,
            resonance: 3.5,
            ..VoiceParams::default()
        };
        let mut voice = held_voice(&busy);
        group.bench_with_input(BenchmarkId::new("busy", size), &size, |b, _| {
            b.iter(|| voice.render(black_box(&mut buffer)))
        });

        // === IDLE ===
        // gate off and envelope silent: the zero-fill fast path
        let mut voice = Voice::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| voice.render(black_box(&mut buffer)))
        });

        // === QUEUED CONTROL ===
        // a parameter snapshot arriving every block, as from the UI
        let (mut synth, mut controller) = MonoSynth::with_queue(SAMPLE_RATE, 1024);
        let params = VoiceParams::default();
        let _ = controller.note_on(110.0);
        group.bench_with_input(BenchmarkId::new("with_param_updates", size), &size, |b, _| {
            b.iter(|| {
                let _ = controller.set_parameters(&params);
                synth.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
