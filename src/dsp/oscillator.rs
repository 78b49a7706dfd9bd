#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

use super::context::{advance_phase, skip_phase, RenderCtx};
use super::noise::WhiteNoise;

/*
Oscillator Bank
===============

Every pitched waveform here is a pure function of a single phase
accumulator. The accumulator is an angle in radians that advances by

    increment = 2π × frequency / sample_rate

per sample and is wrapped back into [0, 2π) as soon as it crosses 2π.
Wrapping is not cosmetic: an unwrapped f32 phase keeps growing during a
long sustained note, its fractional precision shrinks, and the pitch
audibly drifts.

Normalised position within the cycle: t = phase / 2π, t ∈ [0, 1)

  Sawtooth   2t − 1                           ramp −1 → +1, then snap back
  Square     +1 while t < width, else −1      duty cycle = pulse width
  Pulse      Square with width fixed at 0.25  thinner, nasal
  Triangle   4t − 1 for t < 0.5, 3 − 4t after symmetric up/down ramp
  Sine       sin(phase)
  Sub        Square (width 0.5) at half the requested frequency
  Noise      uniform random in [−1, 1]; phase still advances but is unused


Detune
------

Detune is applied as a small linear ratio offset on the frequency:

    frequency × (1 + detune × 0.0001)

This is an approximation of cents, NOT the equal-tempered 2^(cents/1200).
At ±50 it shifts the pitch by ±0.5%, a gentle chorus-like offset.


No band-limiting
----------------

The pitched shapes are naive (aliasing) waveforms. That is the classic
"cheap analog clone" sound and keeps the inner loop branch-light.
*/

/// Fixed duty cycle of the `Pulse` waveform.
pub const PULSE_DUTY: f32 = 0.25;

/// Detune ratio per unit of detune.
pub const DETUNE_RATIO_PER_CENT: f32 = 0.0001;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorWaveform {
    #[default]
    Sawtooth,
    Square,
    Pulse,
    Triangle,
    Sine,
    Sub,
    Noise,
}

impl OscillatorWaveform {
    pub const ALL: [OscillatorWaveform; 7] = [
        OscillatorWaveform::Sawtooth,
        OscillatorWaveform::Square,
        OscillatorWaveform::Pulse,
        OscillatorWaveform::Triangle,
        OscillatorWaveform::Sine,
        OscillatorWaveform::Sub,
        OscillatorWaveform::Noise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OscillatorWaveform::Sawtooth => "Sawtooth",
            OscillatorWaveform::Square => "Square",
            OscillatorWaveform::Pulse => "Pulse",
            OscillatorWaveform::Triangle => "Triangle",
            OscillatorWaveform::Sine => "Sine",
            OscillatorWaveform::Sub => "Sub",
            OscillatorWaveform::Noise => "Noise",
        }
    }
}

/// Narrowest and widest square duty cycle.
pub const MIN_PULSE_WIDTH: f32 = 0.1;
pub const MAX_PULSE_WIDTH: f32 = 0.9;

/// Frequency after the linear detune offset.
#[inline]
pub fn detuned_frequency(frequency: f32, detune_cents: f32) -> f32 {
    frequency * (1.0 + detune_cents * DETUNE_RATIO_PER_CENT)
}

// Pitched waveforms only: `Noise` is drawn by the caller.
#[inline]
fn waveform_sample(waveform: OscillatorWaveform, phase: f32, pulse_width: f32) -> f32 {
    let t = phase / TAU;
    match waveform {
        OscillatorWaveform::Sawtooth => 2.0 * t - 1.0,
        OscillatorWaveform::Square => square(t, pulse_width),
        OscillatorWaveform::Pulse => square(t, PULSE_DUTY),
        OscillatorWaveform::Sub => square(t, 0.5),
        OscillatorWaveform::Triangle => {
            if t < 0.5 {
                4.0 * t - 1.0
            } else {
                3.0 - 4.0 * t
            }
        }
        OscillatorWaveform::Sine => phase.sin(),
        OscillatorWaveform::Noise => 0.0,
    }
}

#[inline]
fn square(t: f32, width: f32) -> f32 {
    if t < width {
        1.0
    } else {
        -1.0
    }
}

/// Phase-accumulating oscillator.
///
/// Holds only its phase and a noise generator, so it is cheap to embed in a
/// voice and never allocates.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f32,
    noise: WhiteNoise,
}

impl Oscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            noise: WhiteNoise::new(),
        }
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            phase: 0.0,
            noise: WhiteNoise::with_seed(seed),
        }
    }

    /// Fill `out` with `waveform` at `ctx.frequency`, advancing the phase by
    /// `out.len()` samples.
    ///
    /// Pulse width is clamped to [`MIN_PULSE_WIDTH`, `MAX_PULSE_WIDTH`].
    /// The `Sub` waveform runs at half of `ctx.frequency`.
    pub fn render(
        &mut self,
        out: &mut [f32],
        ctx: &RenderCtx,
        waveform: OscillatorWaveform,
        pulse_width: f32,
        detune_cents: f32,
    ) {
        let increment = increment(ctx, waveform, detune_cents);
        let pulse_width = pulse_width.max(MIN_PULSE_WIDTH).min(MAX_PULSE_WIDTH);

        if matches!(waveform, OscillatorWaveform::Noise) {
            for sample in out.iter_mut() {
                *sample = self.noise.next_bipolar();
                self.phase = advance_phase(self.phase, increment);
            }
            return;
        }

        for sample in out.iter_mut() {
            *sample = waveform_sample(waveform, self.phase, pulse_width);
            self.phase = advance_phase(self.phase, increment);
        }
    }

    /// Move the phase on by `samples` without producing output, exactly as
    /// far as [`render`](Self::render) would have.
    pub fn advance(
        &mut self,
        samples: usize,
        ctx: &RenderCtx,
        waveform: OscillatorWaveform,
        detune_cents: f32,
    ) {
        let increment = increment(ctx, waveform, detune_cents);
        self.phase = skip_phase(self.phase, increment, samples);
    }

    /// Current phase in radians, always in [0, 2π).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[inline]
fn increment(ctx: &RenderCtx, waveform: OscillatorWaveform, detune_cents: f32) -> f32 {
    let mut frequency = detuned_frequency(ctx.frequency, detune_cents);
    if matches!(waveform, OscillatorWaveform::Sub) {
        frequency *= 0.5;
    }
    ctx.phase_increment(frequency)
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}
