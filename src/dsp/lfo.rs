//! Low Frequency Oscillator (LFO).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

use super::context::{advance_phase, skip_phase, RenderCtx};
use super::noise::WhiteNoise;

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio frequencies (roughly 0.01 Hz
to 20 Hz). It is never heard directly; it moves a parameter over time. In
this synth it sweeps the filter cutoff.

Vocabulary
----------

  control-rate    Frequencies below hearing. The output is a control signal,
                  not audio.

  bipolar         Output swings −1.0 to +1.0, so the target moves above AND
                  below its base value.

  period          Time for one cycle. At 5 Hz: 1/5 s = 200 ms,
                  or sample_rate / 5 samples.


Shapes
------

  SINE         smooth sweep, the classic "wah"
  TRIANGLE     constant rate of change
  SQUARE       jumps between two values, trill-like
  SAMPLE&HOLD  a random value held for one period, then a new one

Sine, triangle and square use the same phase maths as the audio
oscillators (see `dsp/oscillator.rs`), driven by the LFO's own phase.


Sample & Hold Across Blocks
---------------------------

The hold time is sample_rate / rate samples, which is rarely a whole number
and rarely lines up with the block size:

    block:   |------- 512 -------|------- 512 -------|
    hold:    |--- 300 ---|--- 300 ---|--- 300 ---|---

One render call may therefore emit several held values, and a held value
may straddle a block boundary. We keep a fractional countdown of samples
left in the current step and carry it between calls, so the steps land at
the same positions no matter how the stream is chopped into blocks.


Rate ≤ 0
--------

A stopped LFO means "no modulation". The voice skips the LFO entirely in
that case; `render` additionally writes zeros instead of dividing by zero.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LfoWaveform {
    #[default]
    Sine,
    Triangle,
    Square,
    SampleAndHold,
}

impl LfoWaveform {
    pub const ALL: [LfoWaveform; 4] = [
        LfoWaveform::Sine,
        LfoWaveform::Triangle,
        LfoWaveform::Square,
        LfoWaveform::SampleAndHold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LfoWaveform::Sine => "Sine",
            LfoWaveform::Triangle => "Triangle",
            LfoWaveform::Square => "Square",
            LfoWaveform::SampleAndHold => "S&H",
        }
    }
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use monosynth::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(5.0, 48000.0);
/// assert_eq!(samples, 9600.0); // 5 Hz at 48kHz = 9600 samples
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

#[derive(Debug, Clone)]
pub struct Lfo {
    phase: f32,
    held_value: f32,
    hold_remaining: f32, // samples left before the next S&H draw
    noise: WhiteNoise,
}

impl Lfo {
    pub fn new() -> Self {
        Self::with_seed(0x9E37_79B9)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            phase: 0.0,
            held_value: 0.0,
            hold_remaining: 0.0,
            noise: WhiteNoise::with_seed(seed),
        }
    }

    /// Fill `out` with the LFO signal at `rate` Hz, advancing by `out.len()`
    /// samples.
    pub fn render(&mut self, out: &mut [f32], rate: f32, waveform: LfoWaveform, sample_rate: f32) {
        if rate.is_nan() || rate <= 0.0 || sample_rate <= 0.0 {
            out.fill(0.0);
            return;
        }

        let ctx = RenderCtx::from_freq(sample_rate, rate);
        let increment = ctx.phase_increment(rate);

        match waveform {
            LfoWaveform::SampleAndHold => {
                let step = samples_per_period(rate, sample_rate).max(1.0);
                // a faster rate must not wait out the old, longer step
                self.hold_remaining = self.hold_remaining.min(step);

                for sample in out.iter_mut() {
                    if self.hold_remaining <= 0.0 {
                        self.held_value = self.noise.next_bipolar();
                        self.hold_remaining += step;
                    }
                    *sample = self.held_value;
                    self.hold_remaining -= 1.0;
                    self.phase = advance_phase(self.phase, increment);
                }
            }
            _ => {
                for sample in out.iter_mut() {
                    *sample = shape(waveform, self.phase);
                    self.phase = advance_phase(self.phase, increment);
                }
            }
        }
    }

    /// Move on by `samples` without producing output. The phase and the
    /// sample & hold countdown end where [`render`](Self::render) would have
    /// left them; a held value that comes due is drawn once.
    pub fn advance(&mut self, samples: usize, rate: f32, waveform: LfoWaveform, sample_rate: f32) {
        if rate.is_nan() || rate <= 0.0 || sample_rate <= 0.0 || samples == 0 {
            return;
        }

        let increment = RenderCtx::from_freq(sample_rate, rate).phase_increment(rate);
        self.phase = skip_phase(self.phase, increment, samples);

        if waveform == LfoWaveform::SampleAndHold {
            let step = samples_per_period(rate, sample_rate).max(1.0);
            let remaining = self.hold_remaining.min(step) - samples as f32;
            if remaining < 0.0 {
                self.held_value = self.noise.next_bipolar();
                self.hold_remaining = remaining.rem_euclid(step);
            } else {
                self.hold_remaining = remaining;
            }
        }
    }

    /// Current phase in radians, always in [0, 2π).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.held_value = 0.0;
        self.hold_remaining = 0.0;
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn shape(waveform: LfoWaveform, phase: f32) -> f32 {
    let t = phase / TAU;
    match waveform {
        LfoWaveform::Sine => phase.sin(),
        LfoWaveform::Triangle => {
            if t < 0.5 {
                4.0 * t - 1.0
            } else {
                3.0 - 4.0 * t
            }
        }
        LfoWaveform::Square => {
            if t < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        LfoWaveform::SampleAndHold => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn count_steps(buffer: &[f32]) -> usize {
        1 + buffer.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_lfo_output_range() {
        for waveform in LfoWaveform::ALL {
            let mut lfo = Lfo::new();
            let mut buffer = vec![0.0; 4_096];
            lfo.render(&mut buffer, 7.0, waveform, SAMPLE_RATE);
            for &sample in &buffer {
                assert!(
                    (-1.0..=1.0).contains(&sample),
                    "{} sample {} out of range",
                    waveform.name(),
                    sample
                );
            }
        }
    }

    #[test]
    fn test_samples_per_period() {
        assert!((samples_per_period(5.0, 48000.0) - 9600.0).abs() < 1e-6);
        assert!((samples_per_period(1.0, 48000.0) - 48000.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_is_silent_and_frozen() {
        let mut lfo = Lfo::new();
        let mut buffer = vec![1.0; 64];
        lfo.render(&mut buffer, 0.0, LfoWaveform::Sine, SAMPLE_RATE);
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert_eq!(lfo.phase(), 0.0);

        lfo.render(&mut buffer, -3.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn sample_and_hold_emits_several_steps_per_block() {
        let mut lfo = Lfo::new();
        // 100 Hz -> new value every 480 samples
        let mut buffer = vec![0.0; 2_048];
        lfo.render(&mut buffer, 100.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);
        assert_eq!(count_steps(&buffer), 5);
        assert_ne!(buffer[479], buffer[480]);
        assert_eq!(buffer[480], buffer[959]);
    }

    #[test]
    fn sample_and_hold_is_block_size_independent() {
        let mut whole = Lfo::with_seed(7);
        let mut reference = vec![0.0; 3_000];
        whole.render(&mut reference, 37.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);

        let mut chopped = Lfo::with_seed(7);
        let mut pieces = Vec::new();
        for len in [1usize, 63, 512, 700, 1_024, 700] {
            let mut block = vec![0.0; len];
            chopped.render(&mut block, 37.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);
            pieces.extend(block);
        }

        assert_eq!(reference, pieces);
    }

    #[test]
    fn advance_keeps_pace_with_render() {
        let mut rendered = Lfo::new();
        let mut skipped = Lfo::new();
        let mut buffer = vec![0.0; 2_000];
        rendered.render(&mut buffer, 5.5, LfoWaveform::Sine, SAMPLE_RATE);
        skipped.advance(2_000, 5.5, LfoWaveform::Sine, SAMPLE_RATE);
        assert!((rendered.phase() - skipped.phase()).abs() < 1e-3);

        // zero rate stays frozen, as render does
        skipped.advance(2_000, 0.0, LfoWaveform::Sine, SAMPLE_RATE);
        assert!((rendered.phase() - skipped.phase()).abs() < 1e-3);
    }

    #[test]
    fn advanced_sample_and_hold_stays_in_range() {
        let mut lfo = Lfo::new();
        let mut buffer = vec![0.0; 256];
        for _ in 0..20 {
            lfo.advance(1_000, 100.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);
            lfo.render(&mut buffer, 100.0, LfoWaveform::SampleAndHold, SAMPLE_RATE);
            assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut lfo = Lfo::new();
        let mut buffer = vec![0.0; 333];
        for _ in 0..1_000 {
            lfo.render(&mut buffer, 19.5, LfoWaveform::Triangle, SAMPLE_RATE);
            assert!((0.0..TAU).contains(&lfo.phase()));
        }
    }

    #[test]
    fn square_alternates_each_half_period() {
        let mut lfo = Lfo::new();
        // 10 Hz -> 4800 samples per cycle
        let mut buffer = vec![0.0; 4_800];
        lfo.render(&mut buffer, 10.0, LfoWaveform::Square, SAMPLE_RATE);
        assert_eq!(buffer[0], 1.0);
        assert_eq!(buffer[2_000], 1.0);
        assert_eq!(buffer[2_500], -1.0);
        assert_eq!(buffer[4_700], -1.0);
    }
}
